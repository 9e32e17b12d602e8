//! Timed status effects

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Status effect kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum StatusKind {
    /// 1 damage each time the afflicted entity acts
    Poison,
    /// Movement goes astray half the time
    Confusion,
    /// Sees nothing
    Blindness,
}

impl StatusKind {
    pub const fn adjective(&self) -> &'static str {
        match self {
            StatusKind::Poison => "poisoned",
            StatusKind::Confusion => "confused",
            StatusKind::Blindness => "blinded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub kind: StatusKind,
    pub remaining: u32,
}

/// Active effects on one entity, at most one entry per kind
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    entries: Vec<StatusEntry>,
}

/// What one tick of effects did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusTick {
    pub damage: i32,
    pub expired: Vec<StatusKind>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect; an existing entry keeps the longer duration
    pub fn apply(&mut self, kind: StatusKind, turns: u32) {
        if turns == 0 {
            return;
        }
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(entry) => entry.remaining = entry.remaining.max(turns),
            None => {
                self.entries.push(StatusEntry {
                    kind,
                    remaining: turns,
                });
                self.entries.sort_by_key(|e| e.kind);
            }
        }
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    pub fn remaining(&self, kind: StatusKind) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter()
    }

    /// Advance every effect by one of the afflicted entity's actions
    pub fn tick(&mut self) -> StatusTick {
        let mut report = StatusTick::default();
        for entry in &mut self.entries {
            if entry.kind == StatusKind::Poison {
                report.damage += 1;
            }
            entry.remaining = entry.remaining.saturating_sub(1);
            if entry.remaining == 0 {
                report.expired.push(entry.kind);
            }
        }
        self.entries.retain(|e| e.remaining > 0);
        report
    }
}
