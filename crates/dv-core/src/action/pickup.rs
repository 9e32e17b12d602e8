//! Picking up and dropping items
//!
//! Picking up is not destruction: the item loses its `Position` and joins
//! the pack. Gold goes straight to the purse.

use super::wear::is_stuck;
use super::{inventory_item, remove_from_inventory};
use crate::dungeon::Position;
use crate::ecs::{Inventory, Item, Player};
use crate::error::ActionError;
use crate::gameloop::GameState;
use crate::object::ItemKind;

/// Pick up the oldest item on the player's tile
pub fn pick_up(state: &mut GameState) -> Result<(), ActionError> {
    let player = state.player;
    let pos = state.player_position().ok_or(ActionError::GameOver)?;
    let item = *state
        .items_at(pos)
        .first()
        .ok_or(ActionError::NothingHere)?;
    let kind = state
        .registry
        .get::<Item>(item)
        .map(|i| i.kind)
        .ok_or(ActionError::NothingHere)?;

    if let ItemKind::Gold { amount } = kind {
        if let Some(purse) = state.registry.get_mut::<Player>(player) {
            purse.gold += amount;
        }
        state.registry.destroy(item);
        state.message(format!("You pick up {amount} gold pieces."));
    } else {
        let inventory = state
            .registry
            .get_mut::<Inventory>(player)
            .ok_or(ActionError::InventoryFull)?;
        if inventory.is_full() {
            return Err(ActionError::InventoryFull);
        }
        inventory.items.push(item);
        state.registry.take::<Position>(item);
        let name = state.item_name(item);
        state.message(format!("You pick up the {name}."));
    }
    refresh_memory(state, pos);
    Ok(())
}

/// Drop the pack item at `index` onto the player's tile
pub fn drop_item(state: &mut GameState, index: usize) -> Result<(), ActionError> {
    let (item, _) = inventory_item(state, index)?;
    if is_stuck(state, item) {
        return Err(ActionError::Cursed);
    }
    let pos = state.player_position().ok_or(ActionError::GameOver)?;
    remove_from_inventory(state, item);
    state.registry.attach(item, pos);
    let name = state.item_name(item);
    state.message(format!("You drop the {name}."));
    refresh_memory(state, pos);
    Ok(())
}

/// Keep the remembered glyph in step with what lies on the tile
fn refresh_memory(state: &mut GameState, pos: Position) {
    let glyph = state
        .items_at(pos)
        .first()
        .and_then(|id| state.registry.get::<Item>(*id))
        .map(|i| i.kind.symbol());
    state.level.remember_item(pos, glyph);
}
