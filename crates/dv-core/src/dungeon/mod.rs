//! Dungeon system
//!
//! Contains the level map model, rooms, and the level generator.

mod cell;
mod corridor;
mod generation;
mod level;
mod populate;
mod position;
mod room;

pub use cell::{Cell, DoorState, Terrain, TrapKind, TrapState, Visibility};
pub use corridor::{connect_components, dig_l_corridor, join_rooms, place_doors};
pub use generation::{GeneratedLevel, generate};
pub use level::Level;
pub use populate::{Spawn, SpawnKind, place_traps, populate};
pub use position::{Direction, Position};
pub use room::Room;
