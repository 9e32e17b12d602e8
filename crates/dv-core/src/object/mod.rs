//! Item definitions
//!
//! Items are plain entities with an `Item` component; this module holds the
//! tagged kind data they carry, the constructor that spawns them and the
//! per-run table of what the player has identified.

mod discovery;
mod mkobj;
mod objclass;

pub use discovery::Discoveries;
pub use mkobj::{curse, make_item, roll_curse};
pub use objclass::{
    EquipSlot, ItemClass, ItemKind, PotionEffect, RingEffect, ScrollEffect, WandEffect,
};
