//! Searching for hidden doors

use crate::dungeon::{DoorState, Terrain};
use crate::gameloop::GameState;

/// Look around; each adjacent secret door is found with chance 1 in `search_odds`
pub fn search(state: &mut GameState) {
    let Some(pos) = state.player_position() else {
        return;
    };
    let odds = state.balance.search_odds.max(1);
    for spot in pos.neighbours8() {
        if state.level.terrain(spot) == Terrain::Door(DoorState::Secret) && state.rng.one_in(odds) {
            state.level.set_terrain(spot, Terrain::Door(DoorState::Closed));
            state.message("You find a hidden door.");
        }
    }
    state.refresh_fov();
}
