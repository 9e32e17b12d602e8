//! Game configuration: balance constants and spawn tables
//!
//! Tables are plain data. A [`GameConfig`] is validated once, before any
//! gameplay state exists; generation and combat then trust it.

pub mod colors;
mod tables;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::combat::StatusKind;
use crate::error::ConfigError;
use crate::object::{EquipSlot, ItemKind, ScrollEffect};
use crate::rng::GameRng;
use crate::{INVENTORY_LETTERS, MAX_DEPTH, MIN_DEPTH, NORMAL_SPEED, TORCH_RADIUS};

pub use tables::{builtin_items, builtin_monsters};

/// One step of a depth-indexed value: applies from `from_depth` downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthStep {
    pub from_depth: u8,
    pub value: u32,
}

/// Value of the deepest step at or above `depth`, 0 if none applies
pub fn value_at_depth(steps: &[DepthStep], depth: u8) -> u32 {
    steps
        .iter()
        .filter(|s| s.from_depth <= depth)
        .max_by_key(|s| s.from_depth)
        .map_or(0, |s| s.value)
}

/// Status effect a monster may inflict when it hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnHit {
    pub kind: StatusKind,
    pub chance_pct: u32,
    pub turns: u32,
}

/// A monster species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub name: String,
    pub glyph: char,
    pub color: u8,
    pub hp: i32,
    pub strength: i32,
    pub defense: i32,
    pub accuracy: i32,
    pub evasion: i32,
    pub speed: i32,
    pub xp: u32,
    /// Sight radius
    pub sight: i32,
    /// Flees when HP falls below this percentage of max
    pub flee_threshold_pct: i32,
    /// Relative spawn weight among monsters eligible at a depth
    pub weight: u32,
    pub min_depth: u8,
    pub max_depth: u8,
    #[serde(default)]
    pub on_hit: Option<OnHit>,
}

/// An item type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub name: String,
    pub color: u8,
    pub kind: ItemKind,
    pub weight: u32,
    pub min_depth: u8,
    pub max_depth: u8,
    /// Chance in percent that a generated weapon, armor or shield is cursed
    #[serde(default)]
    pub cursed_pct: u32,
}

/// Something that can be picked from a depth-ranged weighted table
trait Weighted {
    fn weight(&self) -> u32;
    fn depth_range(&self) -> (u8, u8);

    fn spawns_at(&self, depth: u8) -> bool {
        let (lo, hi) = self.depth_range();
        self.weight() > 0 && (lo..=hi).contains(&depth)
    }
}

impl Weighted for MonsterTemplate {
    fn weight(&self) -> u32 {
        self.weight
    }
    fn depth_range(&self) -> (u8, u8) {
        (self.min_depth, self.max_depth)
    }
}

impl Weighted for ItemTemplate {
    fn weight(&self) -> u32 {
        self.weight
    }
    fn depth_range(&self) -> (u8, u8) {
        (self.min_depth, self.max_depth)
    }
}

/// Weighted choice among entries eligible at `depth`
fn pick<'a, T: Weighted>(table: &'a [T], depth: u8, rng: &mut GameRng) -> Option<&'a T> {
    let total: u32 = table
        .iter()
        .filter(|e| e.spawns_at(depth))
        .map(Weighted::weight)
        .sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.rn2(total);
    for entry in table.iter().filter(|e| e.spawns_at(depth)) {
        if roll < entry.weight() {
            return Some(entry);
        }
        roll -= entry.weight();
    }
    None
}

/// Tunable numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub player_hp: i32,
    pub player_strength: i32,
    pub player_defense: i32,
    pub player_accuracy: i32,
    pub player_evasion: i32,
    pub player_speed: i32,
    pub inventory_capacity: usize,
    pub starting_nutrition: i32,
    pub max_nutrition: i32,
    /// Damage floor for any hit
    pub min_damage: i32,
    /// Energy spent by one action
    pub action_cost: i32,
    pub torch_radius: i32,
    pub max_monsters_per_room: Vec<DepthStep>,
    pub max_items_per_room: Vec<DepthStep>,
    pub max_entities_per_level: u32,
    pub level_up_hp: i32,
    pub level_up_strength: i32,
    /// Search finds each adjacent secret door with chance 1 in this
    pub search_odds: u32,
    pub dart_damage: u32,
    pub trap_poison_turns: u32,
    pub trap_confusion_turns: u32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            player_hp: 30,
            player_strength: 5,
            player_defense: 1,
            player_accuracy: 4,
            player_evasion: 2,
            player_speed: NORMAL_SPEED,
            inventory_capacity: 26,
            starting_nutrition: 1500,
            max_nutrition: 2000,
            min_damage: 1,
            action_cost: NORMAL_SPEED,
            torch_radius: TORCH_RADIUS,
            max_monsters_per_room: vec![
                DepthStep { from_depth: 1, value: 2 },
                DepthStep { from_depth: 4, value: 3 },
                DepthStep { from_depth: 6, value: 5 },
            ],
            max_items_per_room: vec![
                DepthStep { from_depth: 1, value: 1 },
                DepthStep { from_depth: 4, value: 2 },
            ],
            max_entities_per_level: 40,
            level_up_hp: 10,
            level_up_strength: 1,
            search_odds: 3,
            dart_damage: 4,
            trap_poison_turns: 5,
            trap_confusion_turns: 6,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub balance: BalanceConfig,
    pub monsters: Vec<MonsterTemplate>,
    pub items: Vec<ItemTemplate>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GameConfig {
    /// The shipped tables and balance
    pub fn builtin() -> Self {
        Self {
            balance: BalanceConfig::default(),
            monsters: builtin_monsters(),
            items: builtin_items(),
        }
    }

    /// Parse a JSON configuration and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn monster(&self, name: &str) -> Option<&MonsterTemplate> {
        self.monsters.iter().find(|m| m.name == name)
    }

    pub fn item(&self, name: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Weighted random monster for a depth
    pub fn pick_monster(&self, depth: u8, rng: &mut GameRng) -> Option<&MonsterTemplate> {
        pick(&self.monsters, depth, rng)
    }

    /// Weighted random item for a depth
    pub fn pick_item(&self, depth: u8, rng: &mut GameRng) -> Option<&ItemTemplate> {
        pick(&self.items, depth, rng)
    }

    /// Check tables and balance are usable at every depth
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_balance()?;

        if self.monsters.is_empty() {
            return Err(ConfigError::EmptyTable { table: "monster" });
        }
        if self.items.is_empty() {
            return Err(ConfigError::EmptyTable { table: "item" });
        }

        let mut names = HashSet::new();
        for m in &self.monsters {
            let invalid = |reason: &str| ConfigError::InvalidEntry {
                table: "monster",
                name: m.name.clone(),
                reason: reason.to_string(),
            };
            if m.name.is_empty() || !names.insert(m.name.as_str()) {
                return Err(invalid("name empty or duplicated"));
            }
            if m.hp <= 0 {
                return Err(invalid("hp must be positive"));
            }
            if m.strength < 0 || m.defense < 0 {
                return Err(invalid("negative strength or defense"));
            }
            if m.speed <= 0 {
                return Err(invalid("speed must be positive"));
            }
            if !(0..=100).contains(&m.flee_threshold_pct) {
                return Err(invalid("flee threshold outside 0..=100"));
            }
            if m.glyph.is_whitespace() {
                return Err(invalid("blank glyph"));
            }
            check_depths(m.min_depth, m.max_depth).map_err(|_| invalid("bad depth range"))?;
            if let Some(on_hit) = m.on_hit
                && (on_hit.chance_pct > 100 || on_hit.turns == 0)
            {
                return Err(invalid("on-hit effect out of range"));
            }
        }

        let mut names = HashSet::new();
        for i in &self.items {
            let invalid = |reason: &str| ConfigError::InvalidEntry {
                table: "item",
                name: i.name.clone(),
                reason: reason.to_string(),
            };
            if i.name.is_empty() || !names.insert(i.name.as_str()) {
                return Err(invalid("name empty or duplicated"));
            }
            check_depths(i.min_depth, i.max_depth).map_err(|_| invalid("bad depth range"))?;
            if i.cursed_pct > 100 {
                return Err(invalid("curse chance above 100"));
            }
            if i.cursed_pct > 0 && !i.kind.class().is_enchantable() {
                return Err(invalid("only weapons and armor can be cursed"));
            }
            match i.kind {
                ItemKind::Scroll(ScrollEffect::Fireball { radius, range, .. })
                    if radius < 0 || range <= 0 =>
                {
                    return Err(invalid("fireball radius or range out of range"));
                }
                ItemKind::Scroll(ScrollEffect::Enchant { slot: EquipSlot::Ring }) => {
                    return Err(invalid("rings cannot be enchanted"));
                }
                _ => {}
            }
        }

        for depth in MIN_DEPTH..=MAX_DEPTH {
            if !self.monsters.iter().any(|m| m.spawns_at(depth)) {
                return Err(ConfigError::NoCandidates {
                    table: "monster",
                    depth,
                });
            }
            if !self.items.iter().any(|i| i.spawns_at(depth)) {
                return Err(ConfigError::NoCandidates {
                    table: "item",
                    depth,
                });
            }
        }
        Ok(())
    }

    fn validate_balance(&self) -> Result<(), ConfigError> {
        let b = &self.balance;
        let invalid = |name: &str, reason: &str| ConfigError::InvalidEntry {
            table: "balance",
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if b.player_hp <= 0 {
            return Err(invalid("player_hp", "must be positive"));
        }
        if b.player_speed <= 0 {
            return Err(invalid("player_speed", "must be positive"));
        }
        if b.inventory_capacity == 0 || b.inventory_capacity > INVENTORY_LETTERS.len() {
            return Err(invalid("inventory_capacity", "must be 1..=26"));
        }
        if b.min_damage < 1 {
            return Err(invalid("min_damage", "must be at least 1"));
        }
        if b.action_cost <= 0 {
            return Err(invalid("action_cost", "must be positive"));
        }
        if b.torch_radius <= 0 {
            return Err(invalid("torch_radius", "must be positive"));
        }
        if b.max_nutrition < b.starting_nutrition || b.starting_nutrition <= 0 {
            return Err(invalid("starting_nutrition", "must be in 1..=max_nutrition"));
        }
        if b.search_odds == 0 {
            return Err(invalid("search_odds", "must be positive"));
        }
        Ok(())
    }
}

fn check_depths(min: u8, max: u8) -> Result<(), ConfigError> {
    if min < MIN_DEPTH || max > MAX_DEPTH || min > max {
        return Err(ConfigError::DepthOutOfRange { depth: min.max(max) });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_validates() {
        assert_eq!(GameConfig::builtin().validate(), Ok(()));
    }

    #[test]
    fn test_value_at_depth() {
        let steps = BalanceConfig::default().max_monsters_per_room;
        assert_eq!(value_at_depth(&steps, 1), 2);
        assert_eq!(value_at_depth(&steps, 5), 3);
        assert_eq!(value_at_depth(&steps, 26), 5);
        assert_eq!(value_at_depth(&[], 3), 0);
    }

    #[test]
    fn test_pick_respects_depth() {
        let config = GameConfig::builtin();
        let mut rng = GameRng::new(5);
        for _ in 0..200 {
            let m = config.pick_monster(1, &mut rng).unwrap();
            assert!(m.min_depth <= 1, "{} spawned on depth 1", m.name);
        }
        for _ in 0..200 {
            let m = config.pick_monster(26, &mut rng).unwrap();
            assert!(m.max_depth >= 26, "{} spawned on depth 26", m.name);
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        let mut config = GameConfig::builtin();
        config.monsters.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyTable { table: "monster" })
        );
    }

    #[test]
    fn test_missing_depth_coverage_rejected() {
        let mut config = GameConfig::builtin();
        config.monsters.retain(|m| m.min_depth > 1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NoCandidates {
                table: "monster",
                depth: 1
            })
        );
    }

    #[test]
    fn test_bad_entry_rejected() {
        let mut config = GameConfig::builtin();
        config.monsters[0].hp = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEntry { table: "monster", .. })
        ));

        let mut config = GameConfig::builtin();
        config.items[0].max_depth = 40;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEntry { table: "item", .. })
        ));

        let mut config = GameConfig::builtin();
        let potion = config.items.iter_mut().find(|i| i.name == "healing potion").unwrap();
        potion.cursed_pct = 10;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEntry { table: "item", .. })
        ));

        let mut config = GameConfig::builtin();
        config.balance.min_damage = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEntry { table: "balance", .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::builtin();
        let json = config.to_json_string().unwrap();
        let parsed = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            GameConfig::from_json_str("{\"monsters\": 3}"),
            Err(ConfigError::Parse(_))
        ));
    }
}
