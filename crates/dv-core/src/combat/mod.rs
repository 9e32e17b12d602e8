//! Combat resolution
//!
//! Melee attacks, direct damage from other sources, death handling and the
//! per-action ticking of status effects. All rolls come from the game's RNG.

mod status;

pub use status::{StatusEffects, StatusEntry, StatusKind, StatusTick};

use log::info;

use crate::ecs::{
    CombatStats, EntityId, Equipment, Experience, Health, Inventory, Item, Monster, Player,
};
use crate::gameloop::{GameState, RunStatus};
use crate::rng::GameRng;

/// Result of a combat action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CombatOutcome {
    /// Whether the attack connected
    pub hit: bool,
    /// The d20 roll
    pub roll: u32,
    /// Damage before armor
    pub raw_damage: i32,
    /// Damage applied to the defender
    pub damage: i32,
    /// Defender HP after the attack
    pub defender_hp: i32,
    /// Whether the defender died
    pub killed: bool,
    /// Status effect the hit inflicted
    pub inflicted: Option<StatusKind>,
}

impl CombatOutcome {
    pub const MISS: Self = Self {
        hit: false,
        roll: 0,
        raw_damage: 0,
        damage: 0,
        defender_hp: 0,
        killed: false,
        inflicted: None,
    };
}

/// Roll d20 against the defender's evasion
///
/// A natural 20 always hits and a natural 1 always misses.
pub fn roll_to_hit(rng: &mut GameRng, accuracy: i32, evasion: i32) -> (bool, u32) {
    let roll = rng.rnd(20);
    let hit = match roll {
        20 => true,
        1 => false,
        _ => roll as i32 + accuracy >= 10 + evasion,
    };
    (hit, roll)
}

/// Damage after armor, never below the floor
pub const fn mitigate(raw: i32, armor: i32, min_damage: i32) -> i32 {
    let after = raw - armor;
    if after < min_damage { min_damage } else { after }
}

/// Bonus from an equipped item in the given slot
fn equipped_bonus(
    state: &GameState,
    id: EntityId,
    pick: fn(&Equipment) -> Option<EntityId>,
    bonus: fn(&Item) -> i32,
) -> i32 {
    state
        .registry
        .get::<Equipment>(id)
        .and_then(pick)
        .and_then(|item| state.registry.get::<Item>(item))
        .map_or(0, bonus)
}

/// Weapon damage bonus of an entity
pub fn weapon_bonus(state: &GameState, id: EntityId) -> i32 {
    equipped_bonus(state, id, |e| e.weapon, Item::power_bonus)
}

/// Total armor: base defense plus worn armor and shield
pub fn armor_value(state: &GameState, id: EntityId) -> i32 {
    let base = state
        .registry
        .get::<CombatStats>(id)
        .map_or(0, |s| s.defense);
    base + equipped_bonus(state, id, |e| e.armor, Item::defense_bonus)
        + equipped_bonus(state, id, |e| e.shield, Item::defense_bonus)
}

/// Resolve one melee attack
pub fn resolve_attack(state: &mut GameState, attacker: EntityId, defender: EntityId) -> CombatOutcome {
    if !state.registry.is_alive(attacker) || !state.registry.has::<Health>(defender) {
        return CombatOutcome::MISS;
    }
    let att = state
        .registry
        .get::<CombatStats>(attacker)
        .copied()
        .unwrap_or_default();
    let def = state
        .registry
        .get::<CombatStats>(defender)
        .copied()
        .unwrap_or_default();

    let attacker_name = state.describe(attacker);
    let defender_name = state.describe(defender);

    let (hit, roll) = roll_to_hit(&mut state.rng, att.accuracy, def.evasion);
    if !hit {
        let verb = if state.is_player(attacker) { "miss" } else { "misses" };
        state.message(format!("{} {verb} {defender_name}.", capitalize(&attacker_name)));
        let defender_hp = state.registry.get::<Health>(defender).map_or(0, |h| h.current);
        return CombatOutcome {
            roll,
            defender_hp,
            ..CombatOutcome::MISS
        };
    }

    let raw_damage = state.rng.rnd(att.strength.max(0) as u32) as i32 + weapon_bonus(state, attacker);
    let armor = armor_value(state, defender);
    let damage = mitigate(raw_damage, armor, state.balance.min_damage);

    let mut defender_hp = 0;
    if let Some(health) = state.registry.get_mut::<Health>(defender) {
        health.current -= damage;
        defender_hp = health.current;
    }
    let verb = if state.is_player(attacker) { "hit" } else { "hits" };
    state.message(format!(
        "{} {verb} {defender_name} for {damage} damage.",
        capitalize(&attacker_name)
    ));

    let inflicted = roll_on_hit(state, attacker, defender);

    let killed = defender_hp <= 0;
    if killed {
        kill(state, defender, Some(attacker), &format!("killed by {attacker_name}"));
    }

    CombatOutcome {
        hit,
        roll,
        raw_damage,
        damage,
        defender_hp,
        killed,
        inflicted,
    }
}

/// Monster on-hit effects
fn roll_on_hit(state: &mut GameState, attacker: EntityId, defender: EntityId) -> Option<StatusKind> {
    let on_hit = state.registry.get::<Monster>(attacker)?.on_hit?;
    if !state.rng.percent(on_hit.chance_pct) {
        return None;
    }
    apply_status(state, defender, on_hit.kind, on_hit.turns);
    Some(on_hit.kind)
}

/// Afflict an entity, creating its `StatusEffects` as needed
pub fn apply_status(state: &mut GameState, target: EntityId, kind: StatusKind, turns: u32) {
    if !state.registry.is_alive(target) {
        return;
    }
    match state.registry.get_mut::<StatusEffects>(target) {
        Some(effects) => effects.apply(kind, turns),
        None => {
            let mut effects = StatusEffects::new();
            effects.apply(kind, turns);
            state.registry.attach(target, effects);
        }
    }
    let name = state.describe(target);
    let verb = if state.is_player(target) { "are" } else { "is" };
    state.message(format!("{} {verb} {}!", capitalize(&name), kind.adjective()));
}

/// Deal damage outside melee; returns whether the target died
pub fn apply_damage(
    state: &mut GameState,
    target: EntityId,
    amount: i32,
    source: Option<EntityId>,
    cause: &str,
) -> bool {
    let Some(health) = state.registry.get_mut::<Health>(target) else {
        return false;
    };
    health.current -= amount.max(0);
    if health.current > 0 {
        return false;
    }
    kill(state, target, source, cause);
    true
}

/// Death effects then destruction
///
/// Carried items fall to the floor, the killer gains XP, the player's death
/// ends the run. The entity is destroyed exactly once.
pub fn kill(state: &mut GameState, victim: EntityId, killer: Option<EntityId>, cause: &str) {
    if !state.registry.is_alive(victim) {
        return;
    }
    let name = state.describe(victim);
    let pos = state.registry.get::<crate::dungeon::Position>(victim).copied();

    if let Some(inventory) = state.registry.take::<Inventory>(victim)
        && let Some(pos) = pos
    {
        for item in inventory.items {
            if state.registry.is_alive(item) {
                state.registry.attach(item, pos);
            }
        }
    }

    if state.is_player(victim) {
        info!("player died on depth {}: {cause}", state.level.depth);
        state.message("You die...");
        state.status = RunStatus::Dead {
            cause: cause.to_string(),
        };
    } else {
        info!("{name} died: {cause}");
        state.message(format!("{} dies!", capitalize(&name)));
        let xp = state.registry.get::<Monster>(victim).map_or(0, |m| m.xp_value);
        if let Some(killer) = killer {
            award_xp(state, killer, xp);
        }
    }

    state.scheduler.forget(victim);
    state.registry.destroy(victim);
}

/// Grant XP, applying any level-ups
pub fn award_xp(state: &mut GameState, id: EntityId, xp: u32) {
    let Some(exp) = state.registry.get_mut::<Experience>(id) else {
        return;
    };
    let gained = exp.gain(xp);
    let level = exp.level;
    if gained == 0 {
        return;
    }
    let hp_gain = state.balance.level_up_hp * gained as i32;
    let str_gain = state.balance.level_up_strength * gained as i32;
    if let Some(health) = state.registry.get_mut::<Health>(id) {
        health.max += hp_gain;
        health.current += hp_gain;
    }
    if let Some(stats) = state.registry.get_mut::<CombatStats>(id) {
        stats.strength += str_gain;
    }
    if state.registry.has::<Player>(id) {
        state.message(format!("Your battle skills grow stronger! You reach level {level}."));
    }
}

/// Tick the acting entity's status effects; returns whether it survived
pub fn tick_status(state: &mut GameState, id: EntityId) -> bool {
    let Some(effects) = state.registry.get_mut::<StatusEffects>(id) else {
        return true;
    };
    let report = effects.tick();
    if effects.is_empty() {
        state.registry.take::<StatusEffects>(id);
    }
    let name = state.describe(id);
    for kind in &report.expired {
        let verb = if state.is_player(id) { "are" } else { "is" };
        state.message(format!("{} {verb} no longer {}.", capitalize(&name), kind.adjective()));
    }
    if report.damage > 0 {
        return !apply_damage(state, id, report.damage, None, "poison");
    }
    true
}

/// Confused or blinded entities are impaired
pub fn has_status(state: &GameState, id: EntityId, kind: StatusKind) -> bool {
    state
        .registry
        .get::<StatusEffects>(id)
        .is_some_and(|e| e.has(kind))
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameConfig;
    use crate::dungeon::Position;
    use crate::ecs::{Inventory, RenderOrder, Renderable};

    fn arena() -> (GameState, EntityId, EntityId) {
        let config = GameConfig::builtin();
        let mut state = GameState::new_game(&config, 42).unwrap();
        let player = state.player;
        let orc = state.spawn_monster(config.monster("orc").unwrap(), Position::new(1, 1));
        (state, player, orc)
    }

    #[test]
    fn test_mitigate_floor() {
        assert_eq!(mitigate(10, 8, 1), 2);
        assert_eq!(mitigate(8, 8, 1), 1);
        assert_eq!(mitigate(3, 8, 1), 1);
        assert_eq!(mitigate(0, 0, 1), 1);
    }

    #[test]
    fn test_natural_rolls() {
        // Accuracy so high that only a natural 1 misses
        let mut rng = GameRng::new(1);
        for _ in 0..500 {
            let (hit, roll) = roll_to_hit(&mut rng, 100, 0);
            assert_eq!(hit, roll != 1);
        }
        // Evasion so high that only a natural 20 hits
        for _ in 0..500 {
            let (hit, roll) = roll_to_hit(&mut rng, 0, 100);
            assert_eq!(hit, roll == 20);
        }
    }

    #[test]
    fn test_strength_ten_against_armor_eight() {
        let (mut state, player, orc) = arena();
        state.registry.attach(
            player,
            CombatStats {
                strength: 10,
                defense: 0,
                accuracy: 100,
                evasion: 0,
            },
        );
        state.registry.take::<Equipment>(player);
        for _ in 0..200 {
            state.registry.attach(
                orc,
                CombatStats {
                    strength: 1,
                    defense: 8,
                    accuracy: 0,
                    evasion: 0,
                },
            );
            state.registry.attach(orc, Health::new(1000));
            let outcome = resolve_attack(&mut state, player, orc);
            if outcome.hit {
                assert_eq!(outcome.damage, (outcome.raw_damage - 8).max(1));
                if outcome.raw_damage <= 8 {
                    assert_eq!(outcome.damage, 1);
                }
            }
        }
    }

    #[test]
    fn test_health_never_increases() {
        let (mut state, player, orc) = arena();
        state.registry.attach(orc, Health::new(500));
        for _ in 0..100 {
            let before = state.registry.get::<Health>(orc).unwrap().current;
            let outcome = resolve_attack(&mut state, player, orc);
            let after = state.registry.get::<Health>(orc).unwrap().current;
            assert!(outcome.damage >= 0);
            assert!(after <= before);
            assert_eq!(before - after, outcome.damage);
        }
    }

    #[test]
    fn test_kill_destroys_once_and_drops_loot() {
        let (mut state, player, orc) = arena();
        let pos = *state.registry.get::<Position>(orc).unwrap();
        let loot = state.registry.create();
        state.registry.attach(
            loot,
            Item::new(crate::object::ItemKind::Gold { amount: 5 }, "gold"),
        );
        state.registry.attach(
            loot,
            Renderable {
                glyph: '$',
                color: 11,
                name: "gold".into(),
                order: RenderOrder::Item,
            },
        );
        let mut inv = Inventory::new(4);
        inv.items.push(loot);
        state.registry.attach(orc, inv);
        state.registry.attach(orc, Health { current: 1, max: 10 });
        state.registry.attach(orc, CombatStats::default());
        state.registry.get_mut::<CombatStats>(player).unwrap().accuracy = 100;

        let mut outcome = resolve_attack(&mut state, player, orc);
        while !outcome.hit {
            outcome = resolve_attack(&mut state, player, orc);
        }
        assert!(outcome.killed);
        assert!(!state.registry.is_alive(orc));
        assert_eq!(state.registry.get::<Position>(loot), Some(&pos));
        assert!(!state.registry.destroy(orc), "already destroyed");
        let exp = state.registry.get::<Experience>(player).unwrap();
        assert_eq!(exp.xp, 35);
    }

    #[test]
    fn test_player_death_ends_run() {
        let (mut state, player, orc) = arena();
        state.registry.attach(player, Health { current: 1, max: 30 });
        assert!(apply_damage(&mut state, player, 5, Some(orc), "killed by the orc"));
        assert!(matches!(state.status, RunStatus::Dead { .. }));
        assert!(!state.registry.is_alive(player));
    }

    #[test]
    fn test_poison_tick_damages_and_expires() {
        let (mut state, player, _orc) = arena();
        apply_status(&mut state, player, StatusKind::Poison, 2);
        let hp = state.registry.get::<Health>(player).unwrap().current;
        assert!(tick_status(&mut state, player));
        assert!(tick_status(&mut state, player));
        assert_eq!(state.registry.get::<Health>(player).unwrap().current, hp - 2);
        assert!(!state.registry.has::<StatusEffects>(player));
        assert!(tick_status(&mut state, player), "no effects is a no-op");
    }

    #[test]
    fn test_level_up_raises_stats() {
        let (mut state, player, _orc) = arena();
        let hp_before = state.registry.get::<Health>(player).unwrap().max;
        let str_before = state.registry.get::<CombatStats>(player).unwrap().strength;
        award_xp(&mut state, player, 141);
        assert_eq!(state.registry.get::<Experience>(player).unwrap().level, 2);
        assert_eq!(
            state.registry.get::<Health>(player).unwrap().max,
            hp_before + state.balance.level_up_hp
        );
        assert_eq!(
            state.registry.get::<CombatStats>(player).unwrap().strength,
            str_before + state.balance.level_up_strength
        );
    }
}
