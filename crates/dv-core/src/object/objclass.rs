//! Item classes and their effect data

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::*;

/// Broad item class, one per map glyph
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ItemClass {
    Potion,
    Scroll,
    Weapon,
    Armor,
    Shield,
    Food,
    Gold,
    Ring,
    Wand,
}

impl ItemClass {
    /// Get the display symbol for this class
    pub const fn symbol(&self) -> char {
        match self {
            ItemClass::Potion => POTION_SYM,
            ItemClass::Scroll => SCROLL_SYM,
            ItemClass::Weapon => WEAPON_SYM,
            ItemClass::Armor => ARMOR_SYM,
            ItemClass::Shield => SHIELD_SYM,
            ItemClass::Food => FOOD_SYM,
            ItemClass::Gold => GOLD_SYM,
            ItemClass::Ring => RING_SYM,
            ItemClass::Wand => WAND_SYM,
        }
    }

    /// Classes whose kinds go by a random appearance until identified
    pub const fn is_disguised(&self) -> bool {
        matches!(
            self,
            ItemClass::Potion | ItemClass::Scroll | ItemClass::Ring | ItemClass::Wand
        )
    }

    /// Classes that carry an enchantment and may be cursed
    pub const fn is_enchantable(&self) -> bool {
        matches!(self, ItemClass::Weapon | ItemClass::Armor | ItemClass::Shield)
    }
}

/// What drinking a potion does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionEffect {
    Healing { amount: i32 },
    Poison { turns: u32 },
}

/// What reading a scroll does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollEffect {
    /// Strikes the nearest visible monster
    Lightning { damage: i32, range: i32 },
    /// Confuses the nearest visible monster
    Confusion { turns: u32, range: i32 },
    /// Reveals the level layout
    Mapping,
    /// Identifies the first unidentified item in the pack
    Identify,
    /// Raises the enchantment of the item in `slot` by one
    Enchant { slot: EquipSlot },
    /// Lifts the curse from everything worn or wielded
    RemoveCurse,
    /// Bursts on the nearest visible monster, burning every creature within
    /// `radius` of it
    Fireball { damage: i32, radius: i32, range: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingEffect {
    /// Heal 1 HP every `interval` turns while worn
    Regeneration { interval: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WandEffect {
    Striking { damage: i32, range: i32 },
}

/// Equipment slot an item occupies when worn or wielded
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Shield,
    Ring,
}

/// Item kind with its kind-specific data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Potion(PotionEffect),
    Scroll(ScrollEffect),
    Weapon { power_bonus: i32 },
    Armor { defense_bonus: i32 },
    Shield { defense_bonus: i32 },
    Food { nutrition: i32 },
    Gold { amount: u32 },
    Ring(RingEffect),
    Wand { effect: WandEffect, charges: u32 },
}

impl ItemKind {
    pub const fn class(&self) -> ItemClass {
        match self {
            ItemKind::Potion(_) => ItemClass::Potion,
            ItemKind::Scroll(_) => ItemClass::Scroll,
            ItemKind::Weapon { .. } => ItemClass::Weapon,
            ItemKind::Armor { .. } => ItemClass::Armor,
            ItemKind::Shield { .. } => ItemClass::Shield,
            ItemKind::Food { .. } => ItemClass::Food,
            ItemKind::Gold { .. } => ItemClass::Gold,
            ItemKind::Ring(_) => ItemClass::Ring,
            ItemKind::Wand { .. } => ItemClass::Wand,
        }
    }

    pub const fn symbol(&self) -> char {
        self.class().symbol()
    }

    /// Slot the item goes into, for equippable kinds
    pub const fn equip_slot(&self) -> Option<EquipSlot> {
        match self {
            ItemKind::Weapon { .. } => Some(EquipSlot::Weapon),
            ItemKind::Armor { .. } => Some(EquipSlot::Armor),
            ItemKind::Shield { .. } => Some(EquipSlot::Shield),
            ItemKind::Ring(_) => Some(EquipSlot::Ring),
            _ => None,
        }
    }

    /// Used up by a single use
    pub const fn is_consumable(&self) -> bool {
        matches!(
            self,
            ItemKind::Potion(_) | ItemKind::Scroll(_) | ItemKind::Food { .. }
        )
    }

    /// Weapon damage bonus while wielded
    pub const fn power_bonus(&self) -> i32 {
        match self {
            ItemKind::Weapon { power_bonus } => *power_bonus,
            _ => 0,
        }
    }

    /// Armor bonus while worn
    pub const fn defense_bonus(&self) -> i32 {
        match self {
            ItemKind::Armor { defense_bonus } | ItemKind::Shield { defense_bonus } => {
                *defense_bonus
            }
            _ => 0,
        }
    }
}
