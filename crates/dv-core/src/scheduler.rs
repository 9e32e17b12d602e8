//! Energy-based turn scheduler
//!
//! Every global tick each entity with `Energy` gains its speed. An entity is
//! ready once it holds `ACTION_THRESHOLD` energy. Within a pass the ready
//! entity with the most energy acts first, ties going to the lowest id, and
//! each entity acts at most once per pass. When the pass is exhausted a new
//! pass starts if anyone is still ready (fast entities), otherwise time
//! moves on by one tick.
//!
//! "Unready until a later tick recharges it" is read per pass, not per
//! tick: an entity left holding a full action's worth of energy acts again
//! in the next pass of the same tick.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ACTION_THRESHOLD;
use crate::ecs::{Energy, EntityId, Registry};

/// Ticks to wait for anyone to become ready before giving up
const MAX_IDLE_TICKS: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnScheduler {
    tick: u64,
    acted: BTreeSet<EntityId>,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global ticks elapsed
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Entities that already acted in the current pass
    pub fn has_acted(&self, id: EntityId) -> bool {
        self.acted.contains(&id)
    }

    /// Ready entity that has not acted this pass, if any
    fn ready(&self, registry: &Registry) -> Option<EntityId> {
        registry
            .iter::<Energy>()
            .filter(|(id, e)| e.current >= ACTION_THRESHOLD && !self.acted.contains(id))
            .max_by(|(a_id, a), (b_id, b)| a.current.cmp(&b.current).then(b_id.cmp(a_id)))
            .map(|(id, _)| id)
    }

    /// Pick the next entity to act, advancing time as needed
    ///
    /// Returns `None` only if nothing with positive speed exists.
    pub fn next_actor(&mut self, registry: &mut Registry) -> Option<EntityId> {
        for _ in 0..MAX_IDLE_TICKS {
            if let Some(id) = self.ready(registry) {
                return Some(id);
            }
            let still_ready = registry
                .iter::<Energy>()
                .any(|(_, e)| e.current >= ACTION_THRESHOLD);
            if still_ready {
                self.acted.clear();
                continue;
            }
            if !self.advance_tick(registry) {
                return None;
            }
        }
        None
    }

    /// Grant every entity its speed; returns false if nothing can gain energy
    pub fn advance_tick(&mut self, registry: &mut Registry) -> bool {
        let ids: Vec<EntityId> = registry
            .iter::<Energy>()
            .filter(|(_, e)| e.speed > 0)
            .map(|(id, _)| id)
            .collect();
        if ids.is_empty() {
            return false;
        }
        for id in ids {
            if let Some(energy) = registry.get_mut::<Energy>(id) {
                energy.current += energy.speed;
            }
        }
        self.acted.clear();
        self.tick += 1;
        true
    }

    /// Charge an entity for an action and close its slot in the pass
    pub fn complete_action(&mut self, registry: &mut Registry, id: EntityId, cost: i32) {
        if let Some(energy) = registry.get_mut::<Energy>(id) {
            energy.current -= cost;
        }
        self.acted.insert(id);
    }

    /// Drop bookkeeping for an entity that left play
    pub fn forget(&mut self, id: EntityId) {
        self.acted.remove(&id);
    }
}
