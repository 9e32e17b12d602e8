//! Zapping wands
//!
//! Wands are not used up; each zap spends a charge.

use crate::combat::apply_damage;
use crate::ecs::{EntityId, Item};
use crate::error::ActionError;
use crate::gameloop::GameState;
use crate::object::{ItemKind, WandEffect};

pub fn zap(
    state: &mut GameState,
    item: EntityId,
    effect: WandEffect,
    charges: u32,
) -> Result<(), ActionError> {
    if charges == 0 {
        return Err(ActionError::NotUsable);
    }
    let player = state.player;
    let WandEffect::Striking { damage, range } = effect;
    let target = state
        .nearest_visible_monster(range)
        .ok_or(ActionError::NoTarget)?;

    if let Some(wand) = state.registry.get_mut::<Item>(item) {
        wand.kind = ItemKind::Wand {
            effect,
            charges: charges - 1,
        };
    }
    let wand_name = state.item_name(item);
    let name = state.describe(target);
    state.message(format!("You zap the {wand_name}. Force bolt hits {name}!"));
    apply_damage(state, target, damage, Some(player), "blasted by a wand");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::tests::give;
    use crate::action::{PlayerAction, execute};
    use crate::data::GameConfig;
    use crate::dungeon::Position;
    use crate::ecs::Health;
    use crate::gameloop::testing::arena;

    #[test]
    fn test_charges_run_out() {
        let mut state = arena();
        let config = GameConfig::builtin();
        let troll = state.spawn_monster(config.monster("troll").unwrap(), Position::new(8, 5));
        state.registry.attach(troll, Health::new(10_000));
        state.refresh_fov();
        let wand = give(&mut state, "wand of striking");

        for _ in 0..4 {
            execute(&mut state, PlayerAction::UseItem(0)).unwrap();
        }
        assert!(state.registry.get::<Health>(troll).unwrap().current < 10_000);
        assert_eq!(
            execute(&mut state, PlayerAction::UseItem(0)),
            Err(ActionError::NotUsable)
        );
        assert!(state.registry.is_alive(wand), "wands are not consumed");
    }
}
