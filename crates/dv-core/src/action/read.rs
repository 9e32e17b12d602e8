//! Reading scrolls
//!
//! Targeted scrolls with nothing to act on are refused and kept.

use super::consume;
use crate::MAX_ENCHANTMENT;
use crate::combat::{StatusKind, apply_damage, apply_status, capitalize};
use crate::dungeon::Position;
use crate::ecs::{ComponentSet, EntityId, Equipment, Item};
use crate::error::ActionError;
use crate::gameloop::GameState;
use crate::object::{EquipSlot, ScrollEffect};

pub fn read(state: &mut GameState, item: EntityId, effect: ScrollEffect) -> Result<(), ActionError> {
    let player = state.player;
    match effect {
        ScrollEffect::Lightning { damage, range } => {
            let target = state
                .nearest_visible_monster(range)
                .ok_or(ActionError::NoTarget)?;
            consume(state, item);
            let name = state.describe(target);
            state.message(format!(
                "A lightning bolt strikes {name} with a loud thunder, for {damage} damage!"
            ));
            apply_damage(state, target, damage, Some(player), "struck by lightning");
        }
        ScrollEffect::Confusion { turns, range } => {
            let target = state
                .nearest_visible_monster(range)
                .ok_or(ActionError::NoTarget)?;
            consume(state, item);
            let name = capitalize(&state.describe(target));
            state.message(format!("{name} starts to stumble around!"));
            apply_status(state, target, StatusKind::Confusion, turns);
        }
        ScrollEffect::Mapping => {
            let name = state.item_name(item);
            consume(state, item);
            state.level.reveal_map();
            state.message(format!("You read the {name}. A map forms in your mind!"));
        }
        ScrollEffect::Identify => identify(state, item),
        ScrollEffect::Enchant { slot } => enchant(state, item, slot)?,
        ScrollEffect::RemoveCurse => remove_curse(state, item),
        ScrollEffect::Fireball {
            damage,
            radius,
            range,
        } => fireball(state, item, damage, radius, range)?,
    }
    Ok(())
}

/// Identify the first unidentified item in the pack
fn identify(state: &mut GameState, scroll: EntityId) {
    let name = state.item_name(scroll);
    consume(state, scroll);
    let target = state
        .pack()
        .into_iter()
        .find(|id| !state.is_identified(*id));
    match target {
        Some(target) => {
            let before = state.item_name(target);
            state.identify(target);
            let after = state.item_name(target);
            state.message(format!("You read the {name}. The {before} is a {after}."));
        }
        None => state.message(format!(
            "You read the {name}. You already know everything you carry."
        )),
    }
}

fn enchant(state: &mut GameState, scroll: EntityId, slot: EquipSlot) -> Result<(), ActionError> {
    let target = state
        .registry
        .get::<Equipment>(state.player)
        .and_then(|e| e.slot(slot))
        .ok_or(ActionError::NothingEquipped)?;
    consume(state, scroll);
    let name = state.item_name(target);
    let Some(gear) = state.registry.get_mut::<Item>(target) else {
        return Ok(());
    };
    gear.known = true;
    if gear.enchantment >= MAX_ENCHANTMENT {
        state.message(format!("Your {name} quivers for a moment, then settles."));
        return Ok(());
    }
    gear.enchantment += 1;
    let lifted = std::mem::take(&mut gear.cursed);
    state.message(format!("Your {name} glows blue for a moment."));
    if lifted {
        state.message("A malignant aura leaves it.");
    }
    Ok(())
}

/// Lift every curse on worn and wielded items
fn remove_curse(state: &mut GameState, scroll: EntityId) {
    let name = state.item_name(scroll);
    consume(state, scroll);
    let worn = state
        .registry
        .get::<Equipment>(state.player)
        .map(Equipment::worn)
        .unwrap_or_default();
    let mut lifted = 0;
    for id in worn {
        if let Some(gear) = state.registry.get_mut::<Item>(id)
            && gear.cursed
        {
            gear.cursed = false;
            gear.known = true;
            lifted += 1;
        }
    }
    if lifted > 0 {
        state.message(format!("You read the {name}. You feel like someone is helping you."));
    } else {
        state.message(format!("You read the {name}. You feel a moment of calm."));
    }
}

/// Burst on the nearest visible monster, burning every creature in range of
/// the blast, the reader included
fn fireball(
    state: &mut GameState,
    scroll: EntityId,
    damage: i32,
    radius: i32,
    range: i32,
) -> Result<(), ActionError> {
    let player = state.player;
    let target = state
        .nearest_visible_monster(range)
        .ok_or(ActionError::NoTarget)?;
    let centre = *state
        .registry
        .get::<Position>(target)
        .ok_or(ActionError::NoTarget)?;
    consume(state, scroll);

    let caught: Vec<EntityId> = state
        .registry
        .query(ComponentSet::HEALTH | ComponentSet::POSITION)
        .iter()
        .filter(|id| {
            state
                .registry
                .get::<Position>(*id)
                .is_some_and(|p| p.distance_sq(centre) <= radius * radius)
        })
        .collect();
    let name = state.describe(target);
    state.message(format!(
        "A fireball explodes around {name}, burning {} creature{}!",
        caught.len(),
        if caught.len() == 1 { "" } else { "s" }
    ));
    for id in caught {
        let source = (id != player).then_some(player);
        apply_damage(state, id, damage, source, "burned by a fireball");
    }
    Ok(())
}
