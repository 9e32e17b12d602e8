//! Trap effects
//!
//! Only the player springs traps. A sprung trap stays visible and never
//! re-arms.

use crate::combat::{StatusKind, apply_damage, apply_status};
use crate::dungeon::TrapKind;
use crate::gameloop::GameState;

/// Tries at finding a free landing tile for a teleport
const TELEPORT_TRIES: u32 = 32;

/// Apply a freshly triggered trap to the player
pub fn spring_trap(state: &mut GameState, kind: TrapKind) {
    let player = state.player;
    match kind {
        TrapKind::Dart => {
            state.message("A little dart shoots out at you!");
            let damage = state.rng.rnd(state.balance.dart_damage.max(1)) as i32;
            apply_damage(state, player, damage, None, "killed by a dart trap");
        }
        TrapKind::PoisonNeedle => {
            state.message("A tiny needle pricks you!");
            let turns = state.balance.trap_poison_turns;
            apply_status(state, player, StatusKind::Poison, turns);
        }
        TrapKind::ConfusionGas => {
            state.message("A cloud of gas billows up around you!");
            let turns = state.balance.trap_confusion_turns;
            apply_status(state, player, StatusKind::Confusion, turns);
        }
        TrapKind::Teleport => {
            state.message("You feel a wrenching sensation.");
            teleport_player(state);
        }
    }
}

/// Move the player to a random unoccupied floor tile
fn teleport_player(state: &mut GameState) {
    for _ in 0..TELEPORT_TRIES {
        let Some(pos) = state.level.random_floor(&mut state.rng) else {
            return;
        };
        if state.blocker_at(pos).is_none() {
            state.registry.attach(state.player, pos);
            state.refresh_fov();
            return;
        }
    }
}
