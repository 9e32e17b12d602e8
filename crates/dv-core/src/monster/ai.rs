//! Monster AI
//!
//! A per-monster state machine stepped once per monster action:
//!
//! - `Idle` to `Alert` when the player comes into view, or straight to
//!   `Hunting` if the player is adjacent;
//! - `Alert` to `Hunting` after `ALERT_TICKS` turns or when adjacent, back
//!   to `Idle` if sight is lost;
//! - `Hunting` to `Fleeing` when health drops under the species threshold;
//! - `Fleeing` to `Idle` after `CALM_TICKS` turns out of sight.
//!
//! Hunters walk a cached route to the last known player position.

use serde::{Deserialize, Serialize};

use super::path::find_path;
use crate::combat::{StatusKind, has_status};
use crate::dungeon::{Direction, Position};
use crate::ecs::{AiMode, AiState, EntityId, Health, Monster};
use crate::gameloop::GameState;
use crate::vision::can_see;

/// Turns an alerted monster watches before giving chase
pub const ALERT_TICKS: u32 = 2;

/// Turns out of sight before a fleeing monster calms down
pub const CALM_TICKS: u32 = 5;

/// What a monster decided to do this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiAction {
    Wait,
    Move(Position),
    Attack(EntityId),
}

/// Step the monster's state machine and choose its action
pub fn decide(state: &mut GameState, monster: EntityId) -> AiAction {
    let Some(pos) = state.registry.get::<Position>(monster).copied() else {
        return AiAction::Wait;
    };
    let mut ai = state
        .registry
        .get::<AiState>(monster)
        .cloned()
        .unwrap_or_default();

    let action = match state.player_position() {
        Some(player_pos) => {
            let sight = state.registry.get::<Monster>(monster).map_or(0, |m| m.sight);
            let sees = !has_status(state, monster, StatusKind::Blindness)
                && can_see(pos, player_pos, sight, &state.level);
            let health = state.registry.get::<Health>(monster).copied();
            let flee_pct = state
                .registry
                .get::<Monster>(monster)
                .map_or(0, |m| m.flee_threshold_pct);
            transition(&mut ai, pos, player_pos, sees, health, flee_pct);
            act(state, monster, pos, player_pos, &mut ai)
        }
        None => {
            ai.mode = AiMode::Idle;
            AiAction::Wait
        }
    };

    let action = if has_status(state, monster, StatusKind::Confusion) && state.rng.one_in(2) {
        stumble(state, pos)
    } else {
        action
    };

    if state.registry.is_alive(monster) {
        state.registry.attach(monster, ai);
    }
    action
}

/// Mode transitions driven by perception and health
pub fn transition(
    ai: &mut AiState,
    pos: Position,
    player_pos: Position,
    sees: bool,
    health: Option<Health>,
    flee_threshold_pct: i32,
) {
    let adjacent = pos.is_adjacent(player_pos);
    if sees {
        ai.last_known_player = Some(player_pos);
        ai.lost_ticks = 0;
    } else {
        ai.lost_ticks += 1;
    }

    match ai.mode {
        AiMode::Idle => {
            if sees {
                ai.alert_ticks = 0;
                ai.mode = if adjacent { AiMode::Hunting } else { AiMode::Alert };
            }
        }
        AiMode::Alert => {
            if !sees {
                ai.mode = AiMode::Idle;
            } else {
                ai.alert_ticks += 1;
                if adjacent || ai.alert_ticks >= ALERT_TICKS {
                    ai.mode = AiMode::Hunting;
                }
            }
        }
        AiMode::Hunting => {}
        AiMode::Fleeing => {
            if ai.lost_ticks >= CALM_TICKS {
                ai.mode = AiMode::Idle;
                ai.path.clear();
                ai.path_target = None;
            }
        }
    }

    if ai.mode == AiMode::Hunting
        && let Some(hp) = health
        && hp.current * 100 < hp.max * flee_threshold_pct
    {
        ai.mode = AiMode::Fleeing;
        ai.path.clear();
        ai.path_target = None;
    }
}

fn act(
    state: &mut GameState,
    monster: EntityId,
    pos: Position,
    player_pos: Position,
    ai: &mut AiState,
) -> AiAction {
    match ai.mode {
        AiMode::Idle | AiMode::Alert => AiAction::Wait,
        AiMode::Hunting => hunt(state, monster, pos, player_pos, ai),
        AiMode::Fleeing => flee(state, pos, player_pos),
    }
}

fn hunt(
    state: &mut GameState,
    monster: EntityId,
    pos: Position,
    player_pos: Position,
    ai: &mut AiState,
) -> AiAction {
    if pos.is_adjacent(player_pos) {
        return AiAction::Attack(state.player);
    }
    let Some(target) = ai.last_known_player else {
        ai.mode = AiMode::Idle;
        return AiAction::Wait;
    };
    if pos == target {
        // Reached the last sighting and the player is not here
        ai.mode = AiMode::Idle;
        ai.last_known_player = None;
        ai.path.clear();
        ai.path_target = None;
        return AiAction::Wait;
    }

    let next_valid = ai
        .path
        .first()
        .is_some_and(|next| pos.is_adjacent(*next) && state.level.is_walkable(*next));
    if ai.path_target != Some(target) || !next_valid {
        match find_path(&state.level, pos, target) {
            Some(path) => {
                ai.path = path;
                ai.path_target = Some(target);
            }
            None => {
                ai.mode = AiMode::Idle;
                ai.path.clear();
                ai.path_target = None;
                return AiAction::Wait;
            }
        }
    }

    let Some(&next) = ai.path.first() else {
        return AiAction::Wait;
    };
    if state.blocker_at(next).is_some_and(|id| id != monster) {
        return AiAction::Wait;
    }
    ai.path.remove(0);
    AiAction::Move(next)
}

/// Step to the free neighbour farthest from the player; attack if cornered
fn flee(state: &GameState, pos: Position, player_pos: Position) -> AiAction {
    let current = pos.distance_sq(player_pos);
    let best = Direction::ALL
        .iter()
        .map(|d| pos.step(*d))
        .filter(|p| state.level.is_walkable(*p) && state.blocker_at(*p).is_none())
        .filter(|p| p.distance_sq(player_pos) > current)
        .max_by_key(|p| (p.distance_sq(player_pos), std::cmp::Reverse(*p)));
    match best {
        Some(p) => AiAction::Move(p),
        None if pos.is_adjacent(player_pos) => AiAction::Attack(state.player),
        None => AiAction::Wait,
    }
}

/// A random step, or nothing if it leads nowhere
fn stumble(state: &mut GameState, pos: Position) -> AiAction {
    let dir = Direction::ALL[state.rng.rn2(Direction::ALL.len() as u32) as usize];
    let target = pos.step(dir);
    if !state.level.is_walkable(target) {
        return AiAction::Wait;
    }
    match state.blocker_at(target) {
        Some(id) if id == state.player => AiAction::Attack(id),
        Some(_) => AiAction::Wait,
        None => AiAction::Move(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::apply_status;
    use crate::data::GameConfig;
    use crate::dungeon::Terrain;
    use crate::gameloop::testing::arena;

    fn health(current: i32) -> Option<Health> {
        Some(Health { current, max: 10 })
    }

    /// An orc at `pos` in the given mode, remembering the player at `last_seen`
    fn orc(
        state: &mut GameState,
        pos: Position,
        mode: AiMode,
        last_seen: Option<Position>,
    ) -> EntityId {
        let config = GameConfig::builtin();
        let id = state.spawn_monster(config.monster("orc").unwrap(), pos);
        state.registry.attach(
            id,
            AiState {
                mode,
                last_known_player: last_seen,
                ..Default::default()
            },
        );
        id
    }

    fn blind(state: &mut GameState, id: EntityId) {
        apply_status(state, id, StatusKind::Blindness, 100);
    }

    fn ai(state: &GameState, id: EntityId) -> AiState {
        state.registry.get::<AiState>(id).cloned().unwrap()
    }

    #[test]
    fn test_adjacent_hunter_attacks() {
        let mut state = arena();
        let id = orc(&mut state, Position::new(6, 6), AiMode::Hunting, None);
        assert_eq!(decide(&mut state, id), AiAction::Attack(state.player));
    }

    #[test]
    fn test_hunter_follows_route_to_last_sighting() {
        let mut state = arena();
        let target = Position::new(25, 10);
        let id = orc(&mut state, Position::new(20, 10), AiMode::Hunting, Some(target));
        blind(&mut state, id);

        assert_eq!(decide(&mut state, id), AiAction::Move(Position::new(21, 10)));
        let ai = ai(&state, id);
        assert_eq!(ai.mode, AiMode::Hunting);
        assert_eq!(ai.path_target, Some(target));
        assert_eq!(ai.path.len(), 4);
        assert_eq!(ai.path.last(), Some(&target));
    }

    #[test]
    fn test_cached_route_kept_while_target_unchanged() {
        let mut state = arena();
        let target = Position::new(25, 10);
        let id = orc(&mut state, Position::new(20, 10), AiMode::Hunting, Some(target));
        blind(&mut state, id);
        let detour = vec![
            Position::new(21, 11),
            Position::new(22, 11),
            Position::new(23, 11),
            Position::new(24, 10),
            target,
        ];
        state.registry.get_mut::<AiState>(id).unwrap().path = detour.clone();
        state.registry.get_mut::<AiState>(id).unwrap().path_target = Some(target);

        assert_eq!(decide(&mut state, id), AiAction::Move(Position::new(21, 11)));
        assert_eq!(ai(&state, id).path, detour[1..].to_vec());

        // A new sighting replaces the route
        let moved = Position::new(25, 12);
        state.registry.get_mut::<AiState>(id).unwrap().last_known_player = Some(moved);
        decide(&mut state, id);
        let ai = ai(&state, id);
        assert_eq!(ai.path_target, Some(moved));
        assert_eq!(ai.path.last(), Some(&moved));
    }

    #[test]
    fn test_unreachable_sighting_gives_up() {
        let mut state = arena();
        let pocket = Position::new(28, 13);
        for wall in pocket.neighbours8() {
            state.level.set_terrain(wall, Terrain::Wall);
        }
        let id = orc(&mut state, Position::new(20, 10), AiMode::Hunting, Some(pocket));
        blind(&mut state, id);

        assert_eq!(decide(&mut state, id), AiAction::Wait);
        let ai = ai(&state, id);
        assert_eq!(ai.mode, AiMode::Idle);
        assert!(ai.path.is_empty());
        assert_eq!(ai.path_target, None);
    }

    #[test]
    fn test_empty_sighting_spot_ends_the_hunt() {
        let mut state = arena();
        let spot = Position::new(20, 10);
        let id = orc(&mut state, spot, AiMode::Hunting, Some(spot));
        blind(&mut state, id);

        assert_eq!(decide(&mut state, id), AiAction::Wait);
        let ai = ai(&state, id);
        assert_eq!(ai.mode, AiMode::Idle);
        assert_eq!(ai.last_known_player, None);
    }

    #[test]
    fn test_fleeing_monster_backs_away() {
        let mut state = arena();
        let player = state.player_position().unwrap();
        let start = Position::new(7, 5);
        let id = orc(&mut state, start, AiMode::Fleeing, Some(player));

        match decide(&mut state, id) {
            AiAction::Move(to) => {
                assert!(to.distance_sq(player) > start.distance_sq(player));
                assert!(start.is_adjacent(to));
            }
            other => panic!("expected a retreat, got {other:?}"),
        }
        assert_eq!(ai(&state, id).mode, AiMode::Fleeing);
    }

    #[test]
    fn test_cornered_fleer_fights() {
        let mut state = arena();
        let player = state.player;
        state.registry.attach(player, Position::new(3, 3));
        let id = orc(&mut state, Position::new(2, 2), AiMode::Fleeing, None);
        assert_eq!(decide(&mut state, id), AiAction::Attack(player));
    }

    #[test]
    fn test_idle_to_alert_to_hunting() {
        let mut ai = AiState::default();
        let pos = Position::new(5, 5);
        let player = Position::new(9, 5);
        transition(&mut ai, pos, player, true, health(10), 25);
        assert_eq!(ai.mode, AiMode::Alert);
        assert_eq!(ai.last_known_player, Some(player));
        transition(&mut ai, pos, player, true, health(10), 25);
        assert_eq!(ai.mode, AiMode::Alert);
        transition(&mut ai, pos, player, true, health(10), 25);
        assert_eq!(ai.mode, AiMode::Hunting);
    }

    #[test]
    fn test_adjacent_skips_alert() {
        let mut ai = AiState::default();
        transition(&mut ai, Position::new(5, 5), Position::new(6, 6), true, health(10), 25);
        assert_eq!(ai.mode, AiMode::Hunting);
    }

    #[test]
    fn test_alert_loses_sight() {
        let mut ai = AiState {
            mode: AiMode::Alert,
            ..Default::default()
        };
        transition(&mut ai, Position::new(5, 5), Position::new(9, 5), false, health(10), 25);
        assert_eq!(ai.mode, AiMode::Idle);
    }

    #[test]
    fn test_hunting_flees_when_hurt() {
        let mut ai = AiState {
            mode: AiMode::Hunting,
            ..Default::default()
        };
        transition(&mut ai, Position::new(5, 5), Position::new(9, 5), true, health(3), 25);
        assert_eq!(ai.mode, AiMode::Hunting, "30% is above a 25% threshold");
        transition(&mut ai, Position::new(5, 5), Position::new(9, 5), true, health(2), 25);
        assert_eq!(ai.mode, AiMode::Fleeing);
    }

    #[test]
    fn test_fleeing_calms_after_losing_sight() {
        let mut ai = AiState {
            mode: AiMode::Fleeing,
            ..Default::default()
        };
        for _ in 0..CALM_TICKS - 1 {
            transition(&mut ai, Position::new(5, 5), Position::new(20, 5), false, health(1), 25);
            assert_eq!(ai.mode, AiMode::Fleeing);
        }
        transition(&mut ai, Position::new(5, 5), Position::new(20, 5), false, health(1), 25);
        assert_eq!(ai.mode, AiMode::Idle);
    }

    #[test]
    fn test_sighting_resets_calm_counter() {
        let mut ai = AiState {
            mode: AiMode::Fleeing,
            lost_ticks: 4,
            ..Default::default()
        };
        transition(&mut ai, Position::new(5, 5), Position::new(8, 5), true, health(1), 25);
        assert_eq!(ai.lost_ticks, 0);
        assert_eq!(ai.mode, AiMode::Fleeing);
    }
}
