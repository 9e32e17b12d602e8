//! Player movement
//!
//! Stepping, bump attacks, opening doors, and what happens on arrival.

use log::info;

use super::trap::spring_trap;
use crate::combat::{StatusKind, has_status, resolve_attack};
use crate::dungeon::{Direction, DoorState, Terrain};
use crate::error::ActionError;
use crate::gameloop::{GameState, RunStatus};

/// Move one step, or attack whatever stands there
///
/// Diagonal steps are allowed between wall corners. A confused player
/// lurches in a random direction half the time; bumping a wall then
/// wastes the turn instead of being rejected.
pub fn move_player(state: &mut GameState, dir: Direction) -> Result<(), ActionError> {
    let player = state.player;
    let from = state.player_position().ok_or(ActionError::GameOver)?;

    let confused = has_status(state, player, StatusKind::Confusion);
    let dir = if confused && state.rng.one_in(2) {
        Direction::ALL[state.rng.rn2(Direction::ALL.len() as u32) as usize]
    } else {
        dir
    };
    let to = from.step(dir);

    if let Some(target) = state.blocker_at(to)
        && target != player
    {
        resolve_attack(state, player, target);
        return Ok(());
    }

    match state.level.terrain(to) {
        Terrain::Door(DoorState::Closed) => {
            state.level.set_terrain(to, Terrain::Door(DoorState::Open));
            state.message("You open the door.");
            state.refresh_fov();
            return Ok(());
        }
        terrain if !terrain.is_walkable() => {
            if confused {
                state.message("You stumble into a wall.");
                return Ok(());
            }
            return Err(ActionError::Blocked);
        }
        _ => {}
    }

    state.registry.attach(player, to);
    arrive(state);
    Ok(())
}

/// Effects of standing on the player's tile
fn arrive(state: &mut GameState) {
    let Some(pos) = state.player_position() else {
        return;
    };
    match state.level.terrain(pos) {
        Terrain::Trap { .. } => {
            if let Some(kind) = state.level.trigger_trap(pos) {
                spring_trap(state, kind);
            }
        }
        Terrain::Goal => {
            info!("player reached the goal after {} turns", state.turns);
            state.message("You have found the heart of the dungeon. You win!");
            state.status = RunStatus::Won;
            return;
        }
        _ => {}
    }

    // Teleport traps may have moved the player
    let Some(pos) = state.player_position() else {
        return;
    };
    let names: Vec<String> = state
        .items_at(pos)
        .into_iter()
        .map(|id| state.item_name(id))
        .collect();
    match names.as_slice() {
        [] => {}
        [one] => state.message(format!("You see here a {one}.")),
        many => state.message(format!("There are {} items here.", many.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameConfig;
    use crate::dungeon::{Position, TrapKind, TrapState};
    use crate::ecs::Health;
    use crate::gameloop::testing::arena;

    #[test]
    fn test_step_and_wall() {
        let mut state = arena();
        move_player(&mut state, Direction::East).unwrap();
        assert_eq!(state.player_position(), Some(Position::new(6, 5)));

        state.registry.attach(state.player, Position::new(2, 2));
        assert_eq!(
            move_player(&mut state, Direction::NorthWest),
            Err(ActionError::Blocked)
        );
        assert_eq!(state.player_position(), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_diagonal_between_corners() {
        let mut state = arena();
        state.level.set_terrain(Position::new(6, 5), Terrain::Wall);
        state.level.set_terrain(Position::new(5, 4), Terrain::Wall);
        move_player(&mut state, Direction::NorthEast).unwrap();
        assert_eq!(state.player_position(), Some(Position::new(6, 4)));
    }

    #[test]
    fn test_bump_opens_door_without_moving() {
        let mut state = arena();
        let door = Position::new(6, 5);
        state.level.set_terrain(door, Terrain::Door(DoorState::Closed));
        move_player(&mut state, Direction::East).unwrap();
        assert_eq!(state.level.terrain(door), Terrain::Door(DoorState::Open));
        assert_eq!(state.player_position(), Some(Position::new(5, 5)));
    }

    #[test]
    fn test_secret_door_blocks() {
        let mut state = arena();
        state
            .level
            .set_terrain(Position::new(6, 5), Terrain::Door(DoorState::Secret));
        assert_eq!(
            move_player(&mut state, Direction::East),
            Err(ActionError::Blocked)
        );
    }

    #[test]
    fn test_bump_attacks_monster() {
        let mut state = arena();
        let config = GameConfig::builtin();
        let orc = state.spawn_monster(config.monster("orc").unwrap(), Position::new(6, 5));
        state.registry.attach(orc, Health::new(1000));
        for _ in 0..20 {
            move_player(&mut state, Direction::East).unwrap();
        }
        assert_eq!(state.player_position(), Some(Position::new(5, 5)));
        assert!(state.registry.get::<Health>(orc).unwrap().current < 1000);
    }

    #[test]
    fn test_trap_springs_once() {
        let mut state = arena();
        let pos = Position::new(6, 5);
        state.level.place_trap(pos, TrapKind::Dart);
        let hp = state.registry.get::<Health>(state.player).unwrap().current;
        move_player(&mut state, Direction::East).unwrap();
        assert!(state.registry.get::<Health>(state.player).unwrap().current < hp);
        assert_eq!(
            state.level.terrain(pos),
            Terrain::Trap {
                kind: TrapKind::Dart,
                state: TrapState::Triggered
            }
        );
    }

    #[test]
    fn test_goal_wins() {
        let mut state = arena();
        state.level.set_terrain(Position::new(6, 5), Terrain::Goal);
        move_player(&mut state, Direction::East).unwrap();
        assert_eq!(state.status, RunStatus::Won);
    }

    #[test]
    fn test_items_announced() {
        let mut state = arena();
        let config = GameConfig::builtin();
        state.spawn_item(config.item("dagger").unwrap(), Position::new(6, 5));
        move_player(&mut state, Direction::East).unwrap();
        assert_eq!(state.messages.last(), Some("You see here a dagger."));
    }
}
