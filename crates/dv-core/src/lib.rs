//! dv-core: the Delve engine
//!
//! World generation and turn simulation for a 26-level dungeon crawl: the
//! map model and generator, the entity registry, field of view, the energy
//! scheduler, combat, monster AI and the player's actions, tied together by
//! [`GameLoop`]. No I/O happens here; rendering and persistence are the
//! caller's business.

pub mod action;
pub mod combat;
pub mod data;
pub mod dungeon;
pub mod ecs;
pub mod error;
pub mod monster;
pub mod object;
pub mod scheduler;
pub mod view;
pub mod vision;

mod consts;
mod gameloop;
mod rng;

pub use action::PlayerAction;
pub use consts::*;
pub use data::GameConfig;
pub use error::{ActionError, ConfigError, GameError, GenerationError};
pub use gameloop::{GameLoop, GameState, MessageLog, RunStatus, StoredLevel, TurnOutcome};
pub use rng::{GameRng, level_seed};
pub use view::RenderView;
