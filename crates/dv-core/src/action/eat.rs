//! Eating

use super::consume;
use crate::ecs::{EntityId, Hunger};
use crate::gameloop::GameState;

pub fn eat(state: &mut GameState, item: EntityId, nutrition: i32) {
    let player = state.player;
    if let Some(hunger) = state.registry.get_mut::<Hunger>(player) {
        hunger.eat(nutrition);
    }
    let name = state.item_name(item);
    consume(state, item);
    state.message(format!("You eat the {name}. Delicious!"));
}
