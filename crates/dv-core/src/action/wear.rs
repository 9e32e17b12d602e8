//! Wielding, wearing and removing equipment
//!
//! Equipped items stay in the pack. Using an equipped item again takes it
//! off; using another item for an occupied slot swaps them. A cursed item
//! will not come off until its curse is lifted, and putting something on
//! reveals its curse and enchantment.

use crate::ecs::{EntityId, Equipment, Item};
use crate::error::ActionError;
use crate::gameloop::GameState;

/// Whether `item` is worn and cursed
pub(crate) fn is_stuck(state: &GameState, item: EntityId) -> bool {
    let worn = state
        .registry
        .get::<Equipment>(state.player)
        .is_some_and(|e| e.is_equipped(item));
    worn && state.registry.get::<Item>(item).is_some_and(|i| i.cursed)
}

pub fn toggle(state: &mut GameState, item: EntityId) -> Result<(), ActionError> {
    let player = state.player;
    let slot = state
        .registry
        .get::<Item>(item)
        .and_then(|i| i.kind.equip_slot())
        .ok_or(ActionError::NotUsable)?;
    let equipment = state
        .registry
        .get::<Equipment>(player)
        .copied()
        .ok_or(ActionError::NotUsable)?;

    if equipment.is_equipped(item) {
        if is_stuck(state, item) {
            return Err(ActionError::Cursed);
        }
        let name = state.item_name(item);
        if let Some(equipment) = state.registry.get_mut::<Equipment>(player) {
            equipment.unequip(item);
        }
        state.message(format!("You remove the {name}."));
        return Ok(());
    }
    let previous = equipment.slot(slot);
    if previous.is_some_and(|old| is_stuck(state, old)) {
        return Err(ActionError::Cursed);
    }

    if let Some(equipment) = state.registry.get_mut::<Equipment>(player) {
        *equipment.slot_mut(slot) = Some(item);
    }
    let cursed = match state.registry.get_mut::<Item>(item) {
        Some(gear) => {
            gear.known = true;
            gear.cursed
        }
        None => false,
    };
    let name = state.item_name(item);
    match previous {
        Some(old) => {
            let old_name = state.item_name(old);
            state.message(format!("You remove the {old_name} and equip the {name}."));
        }
        None => state.message(format!("You equip the {name}.")),
    }
    if cursed {
        state.message("You feel a malignant aura surround you.");
    }
    Ok(())
}
