//! Drinking potions

use super::consume;
use crate::combat::{StatusKind, apply_status};
use crate::ecs::{EntityId, Health};
use crate::error::ActionError;
use crate::gameloop::GameState;
use crate::object::PotionEffect;

pub fn quaff(state: &mut GameState, item: EntityId, effect: PotionEffect) -> Result<(), ActionError> {
    let player = state.player;
    match effect {
        PotionEffect::Healing { amount } => {
            let health = state
                .registry
                .get_mut::<Health>(player)
                .ok_or(ActionError::GameOver)?;
            if health.current >= health.max {
                return Err(ActionError::FullHealth);
            }
            let gained = health.heal(amount);
            let name = state.item_name(item);
            consume(state, item);
            state.message(format!("You drink the {name} and recover {gained} HP."));
        }
        PotionEffect::Poison { turns } => {
            consume(state, item);
            state.message("That tasted foul!");
            apply_status(state, player, StatusKind::Poison, turns);
        }
    }
    Ok(())
}
