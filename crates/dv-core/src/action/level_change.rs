//! Taking the stairs
//!
//! Validation only; the game loop builds or restores the destination level.

use super::ActionResult;
use crate::dungeon::Position;
use crate::error::ActionError;
use crate::gameloop::GameState;

fn on_tile(state: &GameState, stairs: Option<Position>) -> bool {
    stairs.is_some() && state.player_position() == stairs
}

pub fn descend(state: &GameState) -> Result<ActionResult, ActionError> {
    if !on_tile(state, state.level.downstairs) {
        return Err(ActionError::NoStairs);
    }
    Ok(ActionResult::Travel(state.level.depth + 1))
}

pub fn ascend(state: &GameState) -> Result<ActionResult, ActionError> {
    if !on_tile(state, state.level.upstairs) {
        return Err(ActionError::NoStairs);
    }
    Ok(ActionResult::Travel(state.level.depth - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameConfig;
    use crate::gameloop::testing::arena;

    #[test]
    fn test_needs_stairs_underfoot() {
        let mut state = arena();
        assert_eq!(descend(&state), Err(ActionError::NoStairs));
        assert_eq!(ascend(&state), Err(ActionError::NoStairs));

        let pos = state.player_position().unwrap();
        state.level.downstairs = Some(pos);
        assert_eq!(descend(&state), Ok(ActionResult::Travel(2)));
    }

    #[test]
    fn test_no_way_up_from_first_level() {
        let config = GameConfig::builtin();
        let state = GameState::new_game(&config, 42).unwrap();
        assert!(state.level.upstairs.is_none());
        assert_eq!(ascend(&state), Err(ActionError::NoStairs));
    }
}
