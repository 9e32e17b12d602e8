//! Level structure
//!
//! The level owns terrain and what the player remembers of it. It never
//! stores entity ids: occupancy comes from `Position` components.

use std::collections::VecDeque;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::{Cell, Position, Room, Terrain, TrapKind, TrapState, Visibility};
use crate::rng::GameRng;
use crate::{COLNO, ROWNO};

/// Create default cells grid
fn default_cells() -> Vec<Vec<Cell>> {
    vec![vec![Cell::wall(); ROWNO]; COLNO]
}

/// Complete level structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Depth, 1..=26
    pub depth: u8,

    /// Seed the generator used for this level
    pub seed: u64,

    /// Map cells, indexed `[x][y]`
    #[serde(default = "default_cells")]
    pub cells: Vec<Vec<Cell>>,

    /// Rooms in generation order; the first is the entry room
    pub rooms: Vec<Room>,

    pub upstairs: Option<Position>,
    pub downstairs: Option<Position>,

    /// Win tile, only on the deepest level
    pub goal: Option<Position>,

    /// Where a player arriving from above (or starting) stands
    pub entry: Position,
}

impl Level {
    /// Create a new level of solid wall
    pub fn new(depth: u8, seed: u64) -> Self {
        Self {
            depth,
            seed,
            cells: default_cells(),
            rooms: Vec::new(),
            upstairs: None,
            downstairs: None,
            goal: None,
            entry: Position::default(),
        }
    }

    /// Get cell at position
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if !pos.in_bounds() {
            return None;
        }
        Some(&self.cells[pos.x as usize][pos.y as usize])
    }

    /// Get mutable cell at position
    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if !pos.in_bounds() {
            return None;
        }
        Some(&mut self.cells[pos.x as usize][pos.y as usize])
    }

    /// Terrain at position; off-map reads as wall
    pub fn terrain(&self, pos: Position) -> Terrain {
        self.cell(pos).map_or(Terrain::Wall, |c| c.terrain)
    }

    /// Set terrain; ignored off-map
    pub fn set_terrain(&mut self, pos: Position, terrain: Terrain) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.terrain = terrain;
        }
    }

    /// Check if position is walkable
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.terrain(pos).is_walkable()
    }

    /// Check if position blocks sight; off-map is opaque
    pub fn is_opaque(&self, pos: Position) -> bool {
        self.terrain(pos).is_opaque()
    }

    /// Place a trap, refusing anything but plain floor
    pub fn place_trap(&mut self, pos: Position, kind: TrapKind) -> bool {
        match self.cell_mut(pos) {
            Some(cell) if cell.terrain == Terrain::Floor => {
                cell.terrain = Terrain::Trap {
                    kind,
                    state: TrapState::Armed,
                };
                true
            }
            _ => false,
        }
    }

    /// Mark the trap at `pos` as sprung; returns its kind
    pub fn trigger_trap(&mut self, pos: Position) -> Option<TrapKind> {
        let cell = self.cell_mut(pos)?;
        match cell.terrain {
            Terrain::Trap {
                kind,
                state: TrapState::Armed,
            } => {
                cell.terrain = Terrain::Trap {
                    kind,
                    state: TrapState::Triggered,
                };
                Some(kind)
            }
            _ => None,
        }
    }

    /// Index of the room whose floor contains `pos`
    pub fn room_at(&self, pos: Position) -> Option<usize> {
        self.cell(pos).and_then(|c| c.room).map(usize::from)
    }

    /// Apply a freshly computed field of view
    ///
    /// Cells in `visible` become `Visible`; cells that were visible and are
    /// not any more drop to `Remembered`.
    pub fn apply_fov(&mut self, visible: &HashSet<Position>) {
        for column in &mut self.cells {
            for cell in column.iter_mut() {
                if cell.visibility == Visibility::Visible {
                    cell.visibility = Visibility::Remembered;
                }
            }
        }
        for &pos in visible {
            if let Some(cell) = self.cell_mut(pos) {
                cell.visibility = Visibility::Visible;
            }
        }
    }

    /// Remember every passage and the walls bordering one
    pub fn reveal_map(&mut self) {
        let mut known = Vec::new();
        for pos in self.positions() {
            let terrain = self.terrain(pos);
            let borders_passage = pos
                .neighbours8()
                .iter()
                .any(|n| self.terrain(*n).is_walkable());
            if terrain.is_walkable() || borders_passage {
                known.push(pos);
            }
        }
        for pos in known {
            if let Some(cell) = self.cell_mut(pos)
                && cell.visibility == Visibility::Unseen
            {
                cell.visibility = Visibility::Remembered;
            }
        }
    }

    /// Record (or clear) the item glyph seen at a position
    pub fn remember_item(&mut self, pos: Position, glyph: Option<char>) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.remembered_item = glyph;
        }
    }

    /// Every map coordinate, column-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        (0..COLNO as i32).flat_map(|x| (0..ROWNO as i32).map(move |y| Position::new(x, y)))
    }

    /// Coordinates whose terrain matches the predicate
    pub fn find_terrain(&self, pred: impl Fn(Terrain) -> bool) -> Vec<Position> {
        self.positions().filter(|p| pred(self.terrain(*p))).collect()
    }

    /// Count tiles matching the predicate
    pub fn count_terrain(&self, pred: impl Fn(Terrain) -> bool) -> usize {
        self.positions().filter(|p| pred(self.terrain(*p))).count()
    }

    /// 4-neighbour flood fill over passages (secret doors included)
    pub fn flood_fill(&self, start: Position) -> HashSet<Position> {
        let mut seen = HashSet::new();
        if !self.terrain(start).is_passage() {
            return seen;
        }
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(pos) = queue.pop_front() {
            for next in pos.neighbours4() {
                if self.terrain(next).is_passage() && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Passages not reachable from `start`, in scan order
    pub fn unreachable_from(&self, start: Position) -> Vec<Position> {
        let reached = self.flood_fill(start);
        self.positions()
            .filter(|p| self.terrain(*p).is_passage() && !reached.contains(p))
            .collect()
    }

    /// Check every passage is reachable from the entry point
    pub fn is_fully_connected(&self) -> bool {
        self.unreachable_from(self.entry).is_empty()
    }

    /// Pick a random plain floor tile
    pub fn random_floor(&self, rng: &mut GameRng) -> Option<Position> {
        let floors = self.find_terrain(|t| t == Terrain::Floor);
        rng.choose(&floors).copied()
    }
}
