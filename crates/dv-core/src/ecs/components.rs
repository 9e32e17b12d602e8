//! Component data
//!
//! Plain data structs; behavior lives in the systems that query them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::EntityId;
use crate::data::OnHit;
use crate::dungeon::Position;
use crate::object::{EquipSlot, ItemKind};

/// Hit points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub const fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub const fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Restore up to `amount`, capped at max; returns HP gained
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current + amount.max(0)).min(self.max);
        self.current - before
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatStats {
    pub strength: i32,
    pub defense: i32,
    pub accuracy: i32,
    pub evasion: i32,
}

/// Carried items, in pickup order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<EntityId>,
    pub capacity: usize,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.items.contains(&id)
    }
}

/// Draw layer; higher draws on top
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum RenderOrder {
    Item,
    Monster,
    Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renderable {
    pub glyph: char,
    pub color: u8,
    pub name: String,
    pub order: RenderOrder,
}

/// Monster behavior mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum AiMode {
    #[default]
    Idle,
    Alert,
    Hunting,
    Fleeing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AiState {
    pub mode: AiMode,
    pub last_known_player: Option<Position>,
    /// Turns spent in `Alert`
    pub alert_ticks: u32,
    /// Consecutive turns without sight of the player
    pub lost_ticks: u32,
    /// Cached route, next step first
    pub path: Vec<Position>,
    /// Tile the cached route leads to
    pub path_target: Option<Position>,
}

/// Turn-readiness counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Energy {
    pub current: i32,
    pub speed: i32,
}

impl Energy {
    pub const fn new(speed: i32) -> Self {
        Self { current: 0, speed }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub name: String,
    /// Cannot be taken off once worn or wielded
    #[serde(default)]
    pub cursed: bool,
    /// Added to the weapon or armor bonus of the kind
    #[serde(default)]
    pub enchantment: i32,
    /// Curse and enchantment have been seen by the player
    #[serde(default)]
    pub known: bool,
}

impl Item {
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            cursed: false,
            enchantment: 0,
            known: false,
        }
    }

    /// Damage bonus while wielded, enchantment included
    pub fn power_bonus(&self) -> i32 {
        match self.kind {
            ItemKind::Weapon { power_bonus } => power_bonus + self.enchantment,
            _ => 0,
        }
    }

    /// Armor bonus while worn, enchantment included
    pub fn defense_bonus(&self) -> i32 {
        match self.kind {
            ItemKind::Armor { defense_bonus } | ItemKind::Shield { defense_bonus } => {
                defense_bonus + self.enchantment
            }
            _ => 0,
        }
    }
}

/// Worn and wielded items; each also stays in the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<EntityId>,
    pub armor: Option<EntityId>,
    #[serde(default)]
    pub shield: Option<EntityId>,
    pub ring: Option<EntityId>,
}

impl Equipment {
    pub fn slot(&self, slot: EquipSlot) -> Option<EntityId> {
        match slot {
            EquipSlot::Weapon => self.weapon,
            EquipSlot::Armor => self.armor,
            EquipSlot::Shield => self.shield,
            EquipSlot::Ring => self.ring,
        }
    }

    pub fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<EntityId> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Shield => &mut self.shield,
            EquipSlot::Ring => &mut self.ring,
        }
    }

    pub fn is_equipped(&self, id: EntityId) -> bool {
        self.worn().contains(&id)
    }

    /// Every equipped item, weapon first
    pub fn worn(&self) -> Vec<EntityId> {
        [self.weapon, self.armor, self.shield, self.ring]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Clear whichever slot holds `id`
    pub fn unequip(&mut self, id: EntityId) -> bool {
        for slot in [
            &mut self.weapon,
            &mut self.armor,
            &mut self.shield,
            &mut self.ring,
        ] {
            if *slot == Some(id) {
                *slot = None;
                return true;
            }
        }
        false
    }
}

/// Marks the player; carries the purse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Player {
    pub gold: u32,
}

/// Monster species data copied from its template at spawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub template: String,
    pub flee_threshold_pct: i32,
    pub xp_value: u32,
    pub sight: i32,
    pub on_hit: Option<OnHit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub level: u32,
    pub xp: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self { level: 1, xp: 0 }
    }
}

impl Experience {
    /// XP needed to leave `level`: `100 * level * sqrt(level + 1)`
    pub fn threshold(level: u32) -> u32 {
        (100.0 * f64::from(level) * f64::from(level + 1).sqrt()) as u32
    }

    pub fn next_threshold(&self) -> u32 {
        Self::threshold(self.level)
    }

    /// Add XP; returns how many levels were gained
    pub fn gain(&mut self, xp: u32) -> u32 {
        self.xp = self.xp.saturating_add(xp);
        let mut gained = 0;
        while self.xp >= self.next_threshold() {
            self.xp -= self.next_threshold();
            self.level += 1;
            gained += 1;
        }
        gained
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunger {
    pub nutrition: i32,
    pub max: i32,
}

impl Hunger {
    pub const fn is_starving(&self) -> bool {
        self.nutrition <= 0
    }

    pub fn eat(&mut self, amount: i32) {
        self.nutrition = (self.nutrition + amount).min(self.max);
    }
}
