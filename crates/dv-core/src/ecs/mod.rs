//! Entity/component model
//!
//! Everything that acts or can be carried is an entity: the player,
//! monsters and items alike. Kinds are distinguished by which components
//! are attached, not by type.

pub mod components;
mod registry;

pub use components::*;
pub use registry::{
    AnyComponent, Component, ComponentKind, ComponentSet, EntityId, EntityRecord, Query, Registry,
};
