//! Initial level population: traps, monsters and items
//!
//! Population yields blueprints only; the game state turns them into
//! entities when the level goes live.

use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::{Level, Position, TrapKind};
use crate::data::{GameConfig, value_at_depth};
use crate::error::ConfigError;
use crate::rng::GameRng;

/// Attempts at finding a free spot before giving up on one placement
const PLACEMENT_TRIES: u32 = 8;

/// What to create at a spawn point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    /// Monster template name
    Monster(String),
    /// Item template name
    Item(String),
}

/// A blueprint for one entity of a fresh level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub pos: Position,
    pub kind: SpawnKind,
}

/// Scatter `rn2(depth / 4 + 2)` traps over room floors, never in the entry room
pub fn place_traps(level: &mut Level, rng: &mut GameRng) -> usize {
    if level.rooms.len() < 2 {
        return 0;
    }
    let kinds: Vec<TrapKind> = TrapKind::iter().collect();
    let wanted = rng.rn2(u32::from(level.depth) / 4 + 2);
    let mut placed = 0;
    for _ in 0..wanted {
        for _ in 0..PLACEMENT_TRIES {
            let idx = 1 + rng.rn2(level.rooms.len() as u32 - 1) as usize;
            let pos = level.rooms[idx].random_point(rng);
            let kind = *rng.choose(&kinds).unwrap_or(&TrapKind::Dart);
            if level.place_trap(pos, kind) {
                placed += 1;
                break;
            }
        }
    }
    placed
}

/// Roll monsters and items for every room but the first
pub fn populate(
    level: &Level,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Result<Vec<Spawn>, ConfigError> {
    let depth = level.depth;
    let balance = &config.balance;
    let max_monsters = value_at_depth(&balance.max_monsters_per_room, depth);
    let max_items = value_at_depth(&balance.max_items_per_room, depth);
    let cap = balance.max_entities_per_level as usize;

    let mut spawns: Vec<Spawn> = Vec::new();
    for room in level.rooms.iter().skip(1) {
        let monsters = rng.rn2(max_monsters + 1);
        let items = rng.rn2(max_items + 1);

        for _ in 0..monsters {
            if spawns.len() >= cap {
                break;
            }
            let Some(pos) = free_spot(level, room, &spawns, rng) else {
                continue;
            };
            let template = config
                .pick_monster(depth, rng)
                .ok_or(ConfigError::NoCandidates {
                    table: "monster",
                    depth,
                })?;
            spawns.push(Spawn {
                pos,
                kind: SpawnKind::Monster(template.name.clone()),
            });
        }

        for _ in 0..items {
            if spawns.len() >= cap {
                break;
            }
            let Some(pos) = free_spot(level, room, &spawns, rng) else {
                continue;
            };
            let template = config
                .pick_item(depth, rng)
                .ok_or(ConfigError::NoCandidates {
                    table: "item",
                    depth,
                })?;
            spawns.push(Spawn {
                pos,
                kind: SpawnKind::Item(template.name.clone()),
            });
        }
    }
    debug!("depth {depth}: {} spawns", spawns.len());
    Ok(spawns)
}

/// A plain floor tile of the room not already claimed by a spawn
fn free_spot(
    level: &Level,
    room: &super::Room,
    spawns: &[Spawn],
    rng: &mut GameRng,
) -> Option<Position> {
    (0..PLACEMENT_TRIES)
        .map(|_| room.random_point(rng))
        .find(|pos| {
            level.terrain(*pos) == super::Terrain::Floor && spawns.iter().all(|s| s.pos != *pos)
        })
}
