//! Monster creation
//!
//! Turns a species template into a live entity.

use log::debug;

use crate::data::MonsterTemplate;
use crate::dungeon::Position;
use crate::ecs::{
    AiState, CombatStats, Energy, EntityId, Health, Monster, RenderOrder, Registry, Renderable,
};

/// Spawn a monster of the given species at `pos`
pub fn make_monster(registry: &mut Registry, template: &MonsterTemplate, pos: Position) -> EntityId {
    let id = registry.create();
    registry.attach(id, pos);
    registry.attach(id, Health::new(template.hp));
    registry.attach(
        id,
        CombatStats {
            strength: template.strength,
            defense: template.defense,
            accuracy: template.accuracy,
            evasion: template.evasion,
        },
    );
    registry.attach(id, Energy::new(template.speed));
    registry.attach(id, AiState::default());
    registry.attach(
        id,
        Renderable {
            glyph: template.glyph,
            color: template.color,
            name: template.name.clone(),
            order: RenderOrder::Monster,
        },
    );
    registry.attach(
        id,
        Monster {
            template: template.name.clone(),
            flee_threshold_pct: template.flee_threshold_pct,
            xp_value: template.xp,
            sight: template.sight,
            on_hit: template.on_hit,
        },
    );
    debug!("spawned {} {id} at {pos}", template.name);
    id
}
