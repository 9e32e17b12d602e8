//! Error types for the engine
//!
//! Configuration and generation failures are fatal to the caller; action
//! errors are rejections that leave the game state untouched.

use thiserror::Error;

use crate::{MAX_DEPTH, MIN_DEPTH};

/// Malformed tables, out-of-range depth, or unusable balance values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("depth {depth} outside {}..={}", MIN_DEPTH, MAX_DEPTH)]
    DepthOutOfRange { depth: u8 },

    #[error("{table} table is empty")]
    EmptyTable { table: &'static str },

    #[error("invalid {table} entry '{name}': {reason}")]
    InvalidEntry {
        table: &'static str,
        name: String,
        reason: String,
    },

    #[error("no {table} entry can spawn at depth {depth}")]
    NoCandidates { table: &'static str, depth: u8 },

    #[error("could not parse configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Level synthesis gave up after its bounded retries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("level {depth} stayed disconnected after {attempts} attempts")]
    Disconnected { depth: u8, attempts: u32 },

    #[error("level {depth} never fit two rooms in {attempts} attempts")]
    TooFewRooms { depth: u8, attempts: u32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A player action that cannot be performed in the current state
///
/// Rejected actions consume no time.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("the way is blocked")]
    Blocked,

    #[error("you are carrying nothing")]
    EmptyInventory,

    #[error("no item in slot {0}")]
    BadIndex(usize),

    #[error("there are no stairs here")]
    NoStairs,

    #[error("your pack is full")]
    InventoryFull,

    #[error("there is nothing here to pick up")]
    NothingHere,

    #[error("that item cannot be used")]
    NotUsable,

    #[error("your health is already full")]
    FullHealth,

    #[error("no enemy is close enough")]
    NoTarget,

    #[error("you are wearing nothing it could affect")]
    NothingEquipped,

    #[error("it is cursed and will not come off")]
    Cursed,

    #[error("level {depth} could not be built")]
    LevelUnavailable { depth: u8 },

    #[error("the game is over")]
    GameOver,

    #[error("the game is not waiting for input")]
    NotAwaitingInput,
}

/// Anything that stops a game from being created or resumed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
