//! Map cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::*;

/// Door states
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum DoorState {
    Open,
    #[default]
    Closed,
    /// Looks and behaves like wall until found by searching
    Secret,
}

/// Trap kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TrapKind {
    Dart,
    PoisonNeedle,
    ConfusionGas,
    Teleport,
}

impl TrapKind {
    pub const fn name(&self) -> &'static str {
        match self {
            TrapKind::Dart => "dart trap",
            TrapKind::PoisonNeedle => "poison needle",
            TrapKind::ConfusionGas => "cloud of confusion gas",
            TrapKind::Teleport => "teleportation trap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum TrapState {
    /// Hidden until something walks onto it
    Armed,
    /// Sprung and visible; never re-arms
    Triggered,
}

/// Terrain of a single map coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display,
)]
pub enum Terrain {
    #[default]
    Wall,
    Floor,
    Door(DoorState),
    StairsUp,
    StairsDown,
    Trap { kind: TrapKind, state: TrapState },
    /// The prize chamber on the deepest level
    Goal,
}

impl Terrain {
    pub const fn is_wall(&self) -> bool {
        matches!(self, Terrain::Wall)
    }

    pub const fn is_door(&self) -> bool {
        matches!(self, Terrain::Door(_))
    }

    /// Check if this blocks sight
    pub const fn is_opaque(&self) -> bool {
        matches!(
            self,
            Terrain::Wall | Terrain::Door(DoorState::Closed) | Terrain::Door(DoorState::Secret)
        )
    }

    /// Check if a creature can enter this cell
    ///
    /// Closed doors count: bumping into one opens it.
    pub const fn is_walkable(&self) -> bool {
        !matches!(self, Terrain::Wall | Terrain::Door(DoorState::Secret))
    }

    /// Floor-like terrain for connectivity purposes
    ///
    /// Includes secret doors, which are passages the player has yet to find.
    pub const fn is_passage(&self) -> bool {
        !self.is_wall()
    }

    /// Get the display character for this terrain
    pub const fn symbol(&self) -> char {
        match self {
            Terrain::Wall => S_WALL,
            Terrain::Floor => S_FLOOR,
            Terrain::Door(DoorState::Open) => S_OPEN_DOOR,
            Terrain::Door(DoorState::Closed) => S_CLOSED_DOOR,
            Terrain::Door(DoorState::Secret) => S_WALL,
            Terrain::StairsUp => S_UPSTAIR,
            Terrain::StairsDown => S_DOWNSTAIR,
            Terrain::Trap {
                state: TrapState::Armed,
                ..
            } => S_FLOOR,
            Terrain::Trap {
                state: TrapState::Triggered,
                ..
            } => S_TRAP,
            Terrain::Goal => S_GOAL,
        }
    }
}

/// What the player knows about a cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Visibility {
    #[default]
    Unseen,
    /// Seen before, shown dimmed
    Remembered,
    Visible,
}

/// A single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,
    pub visibility: Visibility,
    /// Index into the level's room list
    pub room: Option<u8>,
    /// Glyph of the item last seen lying here
    pub remembered_item: Option<char>,
}

impl Cell {
    pub const fn wall() -> Self {
        Self {
            terrain: Terrain::Wall,
            visibility: Visibility::Unseen,
            room: None,
            remembered_item: None,
        }
    }

    pub const fn is_opaque(&self) -> bool {
        self.terrain.is_opaque()
    }

    pub const fn is_walkable(&self) -> bool {
        self.terrain.is_walkable()
    }

    pub const fn is_visible(&self) -> bool {
        matches!(self.visibility, Visibility::Visible)
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self.visibility, Visibility::Unseen)
    }
}
