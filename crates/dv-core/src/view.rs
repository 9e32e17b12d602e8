//! Render snapshot
//!
//! Everything a front end needs to draw one frame, copied out of the game
//! state so the caller never holds a borrow across turns.

use serde::{Deserialize, Serialize};

use crate::combat::{StatusEffects, StatusEntry, armor_value};
use crate::dungeon::{Cell, Position, Visibility};
use crate::ecs::{
    CombatStats, Equipment, Experience, Health, Hunger, Inventory, Item, Player, Renderable,
};
use crate::gameloop::{GameState, RunStatus};
use crate::{COLNO, INVENTORY_LETTERS, ROWNO};

/// Messages carried in each view
const VIEW_MESSAGES: usize = 5;

/// Player numbers for the status line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusLine {
    pub hp: i32,
    pub max_hp: i32,
    pub strength: i32,
    pub armor: i32,
    pub level: u32,
    pub xp: u32,
    pub next_level_xp: u32,
    pub depth: u8,
    pub gold: u32,
    pub turns: u64,
    pub nutrition: i32,
    pub effects: Vec<StatusEntry>,
}

/// One inventory slot as shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub letter: char,
    pub name: String,
    pub equipped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderView {
    pub depth: u8,
    /// Map cells, indexed `[x][y]`
    pub cells: Vec<Vec<Cell>>,
    /// Entities on currently visible tiles, drawn in order
    pub entities: Vec<(Position, Renderable)>,
    pub status: StatusLine,
    pub inventory: Vec<InventoryLine>,
    pub messages: Vec<String>,
    pub run: RunStatus,
}

impl RenderView {
    pub fn build(state: &GameState) -> Self {
        let mut entities: Vec<(Position, Renderable)> = state
            .registry
            .iter::<Renderable>()
            .filter_map(|(id, r)| {
                let pos = *state.registry.get::<Position>(id)?;
                let visible = state.level.cell(pos).is_some_and(Cell::is_visible);
                visible.then(|| {
                    let mut r = r.clone();
                    if state.registry.has::<Item>(id) {
                        r.name = state.item_name(id);
                    }
                    (pos, r)
                })
            })
            .collect();
        entities.sort_by_key(|(_, r)| r.order);

        Self {
            depth: state.level.depth,
            cells: state.level.cells.clone(),
            entities,
            status: status_line(state),
            inventory: inventory_lines(state),
            messages: state
                .messages
                .recent(VIEW_MESSAGES)
                .map(str::to_string)
                .collect(),
            run: state.status.clone(),
        }
    }

    /// What to draw at a map position
    pub fn glyph_at(&self, pos: Position) -> char {
        if let Some((_, r)) = self.entities.iter().rev().find(|(p, _)| *p == pos) {
            return r.glyph;
        }
        let Some(cell) = pos
            .in_bounds()
            .then(|| &self.cells[pos.x as usize][pos.y as usize])
        else {
            return ' ';
        };
        match cell.visibility {
            Visibility::Unseen => ' ',
            Visibility::Remembered => cell.remembered_item.unwrap_or(cell.terrain.symbol()),
            Visibility::Visible => cell.terrain.symbol(),
        }
    }

    /// The map as text, one line per row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((COLNO + 1) * ROWNO);
        for y in 0..ROWNO as i32 {
            for x in 0..COLNO as i32 {
                out.push(self.glyph_at(Position::new(x, y)));
            }
            out.push('\n');
        }
        out
    }
}

fn status_line(state: &GameState) -> StatusLine {
    let reg = &state.registry;
    let id = state.player;
    let health = reg.get::<Health>(id).copied();
    let exp = reg.get::<Experience>(id).copied().unwrap_or_default();
    StatusLine {
        hp: health.map_or(0, |h| h.current),
        max_hp: health.map_or(0, |h| h.max),
        strength: reg.get::<CombatStats>(id).map_or(0, |s| s.strength),
        armor: armor_value(state, id),
        level: exp.level,
        xp: exp.xp,
        next_level_xp: exp.next_threshold(),
        depth: state.level.depth,
        gold: reg.get::<Player>(id).map_or(0, |p| p.gold),
        turns: state.turns,
        nutrition: reg.get::<Hunger>(id).map_or(0, |h| h.nutrition),
        effects: reg
            .get::<StatusEffects>(id)
            .map(|e| e.iter().copied().collect())
            .unwrap_or_default(),
    }
}

fn inventory_lines(state: &GameState) -> Vec<InventoryLine> {
    let reg = &state.registry;
    let Some(inventory) = reg.get::<Inventory>(state.player) else {
        return Vec::new();
    };
    let equipment = reg.get::<Equipment>(state.player).copied().unwrap_or_default();
    inventory
        .items
        .iter()
        .zip(INVENTORY_LETTERS.chars())
        .map(|(item, letter)| InventoryLine {
            letter,
            name: state.item_name(*item),
            equipped: equipment.is_equipped(*item),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameConfig;
    use crate::gameloop::testing::arena;

    #[test]
    fn test_player_drawn_on_top() {
        let mut state = arena();
        let config = GameConfig::builtin();
        let pos = state.player_position().unwrap();
        state.spawn_item(config.item("dagger").unwrap(), pos);
        let view = RenderView::build(&state);
        assert_eq!(view.glyph_at(pos), '@');
        assert_eq!(view.status.hp, view.status.max_hp);
        assert_eq!(view.status.depth, 1);
    }

    #[test]
    fn test_unseen_is_blank_and_remembered_keeps_items() {
        let mut state = arena();
        let config = GameConfig::builtin();
        let dagger = Position::new(8, 5);
        state.spawn_item(config.item("dagger").unwrap(), dagger);
        state.refresh_fov();
        let view = RenderView::build(&state);
        assert_eq!(view.glyph_at(Position::new(70, 40)), ' ');
        assert_eq!(view.glyph_at(dagger), ')');

        // Walk out of sight: the dagger is remembered, monsters are not reported
        state.level.set_terrain(Position::new(7, 5), crate::dungeon::Terrain::Wall);
        let rat = state.spawn_monster(config.monster("rat").unwrap(), Position::new(9, 5));
        for y in 2..16 {
            state.level.set_terrain(Position::new(6, y), crate::dungeon::Terrain::Wall);
        }
        state.refresh_fov();
        let view = RenderView::build(&state);
        assert_eq!(view.glyph_at(dagger), ')');
        assert!(view.entities.iter().all(|(p, _)| *p != Position::new(9, 5)));
        assert!(state.registry.is_alive(rat));
    }

    #[test]
    fn test_unidentified_items_show_their_appearance() {
        let mut state = arena();
        let config = GameConfig::builtin();
        let scroll = config.item("lightning scroll").unwrap();
        let spot = Position::new(7, 5);
        state.spawn_item(scroll, spot);
        crate::action::tests::give(&mut state, "lightning scroll");
        state.refresh_fov();

        let label = state.discoveries.appearance("lightning scroll").unwrap().to_string();
        let view = RenderView::build(&state);
        let (_, on_floor) = view.entities.iter().find(|(p, _)| *p == spot).unwrap();
        assert_eq!(on_floor.name, label);
        assert_eq!(view.inventory[0].name, label);

        state.discoveries.learn("lightning scroll");
        let view = RenderView::build(&state);
        assert_eq!(view.inventory[0].name, "lightning scroll");
    }

    #[test]
    fn test_ascii_dimensions() {
        let state = arena();
        let text = RenderView::build(&state).to_ascii();
        assert_eq!(text.lines().count(), ROWNO);
        assert!(text.lines().all(|l| l.chars().count() == COLNO));
    }
}
