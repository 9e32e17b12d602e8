//! Monster system
//!
//! Creation from species templates, the behavior state machine, and
//! pathfinding.

pub mod ai;
mod makemon;
mod path;

pub use ai::{ALERT_TICKS, AiAction, CALM_TICKS, decide, transition};
pub use makemon::make_monster;
pub use path::find_path;
