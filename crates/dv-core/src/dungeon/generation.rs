//! Level generation
//!
//! `generate` is a pure function of depth, campaign seed and configuration:
//! the same inputs always give the same tiles and the same spawn list.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::corridor::{connect_components, join_rooms, place_doors};
use super::populate::{Spawn, place_traps, populate};
use super::{Level, Room, Terrain};
use crate::data::GameConfig;
use crate::error::{ConfigError, GenerationError};
use crate::rng::{GameRng, level_seed};
use crate::*;

/// A fully built level plus the entities it starts with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub level: Level,
    pub spawns: Vec<Spawn>,
}

/// Why a single attempt was thrown away
enum AttemptFailure {
    TooFewRooms,
    Disconnected,
}

/// Generate the level at `depth` of the campaign
pub fn generate(
    depth: u8,
    campaign_seed: u64,
    config: &GameConfig,
) -> Result<GeneratedLevel, GenerationError> {
    if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        return Err(ConfigError::DepthOutOfRange { depth }.into());
    }

    let seed = level_seed(campaign_seed, depth);
    let mut rng = GameRng::new(seed);
    let mut disconnected = 0;

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        match try_generate(depth, seed, &mut rng) {
            Ok(mut level) => {
                place_stairs(&mut level);
                let traps = place_traps(&mut level, &mut rng);
                let spawns = populate(&level, config, &mut rng)?;
                debug!(
                    "depth {depth}: attempt {attempt} ok, {} rooms, {traps} traps",
                    level.rooms.len()
                );
                return Ok(GeneratedLevel { level, spawns });
            }
            Err(AttemptFailure::TooFewRooms) => {
                debug!("depth {depth}: attempt {attempt} fit too few rooms");
            }
            Err(AttemptFailure::Disconnected) => {
                disconnected += 1;
                warn!("depth {depth}: attempt {attempt} discarded, level disconnected");
            }
        }
    }

    if disconnected > 0 {
        Err(GenerationError::Disconnected {
            depth,
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    } else {
        Err(GenerationError::TooFewRooms {
            depth,
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

/// Rooms, corridors, doors and connectivity repair
fn try_generate(depth: u8, seed: u64, rng: &mut GameRng) -> Result<Level, AttemptFailure> {
    let mut level = Level::new(depth, seed);
    let rooms = sample_rooms(rng);
    if rooms.len() < MIN_ROOMS {
        return Err(AttemptFailure::TooFewRooms);
    }

    for (idx, room) in rooms.iter().enumerate() {
        for pos in room.floor() {
            if let Some(cell) = level.cell_mut(pos) {
                cell.terrain = Terrain::Floor;
                cell.room = Some(idx as u8);
            }
        }
    }

    join_rooms(&mut level, &rooms, rng);
    place_doors(&mut level, &rooms, rng);

    let entry = rooms[0].center();
    level.entry = entry;
    level.rooms = rooms;
    if !connect_components(&mut level, entry, rng) {
        return Err(AttemptFailure::Disconnected);
    }
    Ok(level)
}

/// Rejection-sample up to `MAX_ROOMS` non-overlapping rooms
///
/// Sizes are footprints including walls; rooms keep `ROOM_PADDING` tiles
/// of rock between their wall rings and never touch the map border.
fn sample_rooms(rng: &mut GameRng) -> Vec<Room> {
    let mut rooms: Vec<Room> = Vec::new();
    for _ in 0..MAX_ROOMS {
        let width = rng.range(ROOM_MIN_SIZE as i32, ROOM_MAX_SIZE as i32) - 2;
        let height = rng.range(ROOM_MIN_SIZE as i32, ROOM_MAX_SIZE as i32) - 2;
        let x = rng.range(2, COLNO as i32 - 2 - width);
        let y = rng.range(2, ROWNO as i32 - 2 - height);
        let room = Room::new(x, y, width, height);

        let buffer = 1 + ROOM_PADDING as i32;
        if rooms.iter().any(|r| room.overlaps(r, buffer)) {
            continue;
        }
        rooms.push(room);
    }
    rooms
}

/// Up stairs in the first room, down stairs (or the goal) in the last
fn place_stairs(level: &mut Level) {
    let (Some(first), Some(last)) = (level.rooms.first().copied(), level.rooms.last().copied())
    else {
        return;
    };
    let entry = first.center();
    level.entry = entry;
    if level.depth > MIN_DEPTH {
        level.set_terrain(entry, Terrain::StairsUp);
        level.upstairs = Some(entry);
    }

    let exit = last.center();
    if level.depth < MAX_DEPTH {
        level.set_terrain(exit, Terrain::StairsDown);
        level.downstairs = Some(exit);
    } else {
        level.set_terrain(exit, Terrain::Goal);
        level.goal = Some(exit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_bounds_rejected() {
        let config = GameConfig::builtin();
        for depth in [0, 27, 200] {
            assert_eq!(
                generate(depth, 1, &config).unwrap_err(),
                GenerationError::Config(ConfigError::DepthOutOfRange { depth })
            );
        }
    }

    #[test]
    fn test_rooms_inside_border() {
        let mut rng = GameRng::new(11);
        for room in sample_rooms(&mut rng) {
            assert!(room.x >= 2 && room.y >= 2);
            assert!(room.x + room.width < COLNO as i32 - 1);
            assert!(room.y + room.height < ROWNO as i32 - 1);
            assert!((4..=8).contains(&room.width));
            assert!((4..=8).contains(&room.height));
        }
    }

    #[test]
    fn test_stairs_by_depth() {
        let config = GameConfig::builtin();
        let first = generate(1, 42, &config).unwrap().level;
        assert!(first.upstairs.is_none());
        assert!(first.downstairs.is_some());

        let middle = generate(12, 42, &config).unwrap().level;
        assert!(middle.upstairs.is_some());
        assert!(middle.downstairs.is_some());
        assert_eq!(middle.upstairs, Some(middle.entry));

        let last = generate(MAX_DEPTH, 42, &config).unwrap().level;
        assert!(last.downstairs.is_none());
        assert!(last.goal.is_some());
        assert_eq!(last.count_terrain(|t| t == Terrain::Goal), 1);
    }

    #[test]
    fn test_generated_level_connected() {
        let config = GameConfig::builtin();
        for depth in [1, 5, 13, 26] {
            let level = generate(depth, 7, &config).unwrap().level;
            assert!(level.is_fully_connected(), "depth {depth} disconnected");
        }
    }
}
