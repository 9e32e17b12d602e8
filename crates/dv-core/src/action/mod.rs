//! Player action system
//!
//! The vocabulary of things the player can do on their turn, with
//! validation and execution. A rejected action returns an `ActionError`
//! before touching the state, so it costs no time.

mod eat;
mod level_change;
mod movement;
mod pickup;
mod quaff;
mod read;
mod search;
mod trap;
mod wear;
mod zap;

use serde::{Deserialize, Serialize};

use crate::dungeon::Direction;
use crate::ecs::{EntityId, Equipment, Inventory, Item};
use crate::error::ActionError;
use crate::gameloop::{GameState, RunStatus};
use crate::object::ItemKind;

/// Player command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Step, attacking whatever stands in the way
    Move(Direction),
    Wait,
    /// Look for hidden doors around the player
    Search,
    PickUp,
    /// Drop the inventory item at this index
    Drop(usize),
    /// Drink, read, eat, wield, wear or zap the inventory item at this index
    UseItem(usize),
    Descend,
    Ascend,
}

/// Result of a successful action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    /// Done; time passes
    Acted,
    /// Done; the player takes the stairs to this depth
    Travel(u8),
}

/// Validate and perform one player action
pub fn execute(state: &mut GameState, action: PlayerAction) -> Result<ActionResult, ActionError> {
    if state.status != RunStatus::Playing || state.player_position().is_none() {
        return Err(ActionError::GameOver);
    }
    match action {
        PlayerAction::Move(dir) => movement::move_player(state, dir)?,
        PlayerAction::Wait => {}
        PlayerAction::Search => search::search(state),
        PlayerAction::PickUp => pickup::pick_up(state)?,
        PlayerAction::Drop(index) => pickup::drop_item(state, index)?,
        PlayerAction::UseItem(index) => use_item(state, index)?,
        PlayerAction::Descend => return level_change::descend(state),
        PlayerAction::Ascend => return level_change::ascend(state),
    }
    Ok(ActionResult::Acted)
}

/// Dispatch on the kind of the chosen item
///
/// Using an item successfully identifies its kind.
fn use_item(state: &mut GameState, index: usize) -> Result<(), ActionError> {
    let (item, kind) = inventory_item(state, index)?;
    let name = state
        .registry
        .get::<Item>(item)
        .map(|i| i.name.clone())
        .unwrap_or_default();
    match kind {
        ItemKind::Potion(effect) => quaff::quaff(state, item, effect)?,
        ItemKind::Scroll(effect) => read::read(state, item, effect)?,
        ItemKind::Food { nutrition } => eat::eat(state, item, nutrition),
        ItemKind::Weapon { .. }
        | ItemKind::Armor { .. }
        | ItemKind::Shield { .. }
        | ItemKind::Ring(_) => wear::toggle(state, item)?,
        ItemKind::Wand { effect, charges } => zap::zap(state, item, effect, charges)?,
        ItemKind::Gold { .. } => return Err(ActionError::NotUsable),
    }
    state.discoveries.learn(&name);
    Ok(())
}

/// The player's item at `index`, with its kind
pub(crate) fn inventory_item(
    state: &GameState,
    index: usize,
) -> Result<(EntityId, ItemKind), ActionError> {
    let inventory = state
        .registry
        .get::<Inventory>(state.player)
        .ok_or(ActionError::EmptyInventory)?;
    if inventory.items.is_empty() {
        return Err(ActionError::EmptyInventory);
    }
    let id = *inventory
        .items
        .get(index)
        .ok_or(ActionError::BadIndex(index))?;
    let item = state
        .registry
        .get::<Item>(id)
        .ok_or(ActionError::BadIndex(index))?;
    Ok((id, item.kind))
}

/// Take an item out of the player's pack, unequipping it first
pub(crate) fn remove_from_inventory(state: &mut GameState, item: EntityId) {
    let player = state.player;
    if let Some(equipment) = state.registry.get_mut::<Equipment>(player) {
        equipment.unequip(item);
    }
    if let Some(inventory) = state.registry.get_mut::<Inventory>(player) {
        inventory.items.retain(|id| *id != item);
    }
}

/// Use up an item
pub(crate) fn consume(state: &mut GameState, item: EntityId) {
    remove_from_inventory(state, item);
    state.registry.destroy(item);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::GameConfig;
    use crate::gameloop::testing::arena;
    use crate::object::make_item;

    /// Put a fresh item from the built-in tables into the player's pack
    pub(crate) fn give(state: &mut GameState, name: &str) -> EntityId {
        let config = GameConfig::builtin();
        let item = make_item(&mut state.registry, config.item(name).unwrap(), None);
        let player = state.player;
        state
            .registry
            .get_mut::<Inventory>(player)
            .unwrap()
            .items
            .push(item);
        item
    }

    #[test]
    fn test_use_with_empty_inventory() {
        let mut state = arena();
        assert_eq!(
            execute(&mut state, PlayerAction::UseItem(0)),
            Err(ActionError::EmptyInventory)
        );
    }

    #[test]
    fn test_bad_index() {
        let mut state = arena();
        give(&mut state, "food ration");
        assert_eq!(
            execute(&mut state, PlayerAction::UseItem(3)),
            Err(ActionError::BadIndex(3))
        );
        assert_eq!(
            execute(&mut state, PlayerAction::Drop(1)),
            Err(ActionError::BadIndex(1))
        );
    }

    #[test]
    fn test_dead_player_cannot_act() {
        let mut state = arena();
        state.status = RunStatus::Dead {
            cause: "test".into(),
        };
        assert_eq!(
            execute(&mut state, PlayerAction::Wait),
            Err(ActionError::GameOver)
        );
    }

    #[test]
    fn test_using_an_item_reveals_its_kind() {
        let mut state = arena();
        let potion = give(&mut state, "healing potion");
        let spare = give(&mut state, "healing potion");
        let disguised = state.item_name(potion);
        assert!(disguised.ends_with(" potion"));
        assert_ne!(disguised, "healing potion");

        // Refused at full health: nothing learned
        assert_eq!(
            execute(&mut state, PlayerAction::UseItem(0)),
            Err(ActionError::FullHealth)
        );
        assert!(!state.is_identified(spare));

        state.registry.get_mut::<crate::ecs::Health>(state.player).unwrap().current -= 3;
        execute(&mut state, PlayerAction::UseItem(0)).unwrap();
        assert!(!state.registry.is_alive(potion));
        assert_eq!(state.item_name(spare), "healing potion");
        assert!(state.is_identified(spare));
    }

    #[test]
    fn test_consume_destroys_and_unequips() {
        let mut state = arena();
        let dagger = give(&mut state, "dagger");
        execute(&mut state, PlayerAction::UseItem(0)).unwrap();
        assert!(state.registry.get::<Equipment>(state.player).unwrap().is_equipped(dagger));
        consume(&mut state, dagger);
        assert!(!state.registry.is_alive(dagger));
        assert!(!state.registry.get::<Equipment>(state.player).unwrap().is_equipped(dagger));
        assert!(state.registry.get::<Inventory>(state.player).unwrap().items.is_empty());
    }
}
