//! Field of view
//!
//! Visibility is recomputed from scratch for each observer; the level
//! records what the player has seen.

mod fov;

pub use fov::{FovSet, compute_visible};

use crate::dungeon::{Level, Position};

/// Whether `target` is in view of an observer at `from` with the given sight
///
/// Cheap distance rejection first, then a full shadowcast.
pub fn can_see(from: Position, target: Position, sight: i32, level: &Level) -> bool {
    if sight <= 0 || from.distance_sq(target) > sight * sight {
        return false;
    }
    from == target || compute_visible(from, sight, level).contains(&target)
}
