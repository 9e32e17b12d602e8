//! Main game loop
//!
//! `GameState` is the whole world of one run. `GameLoop` owns it and drives
//! the scheduler, handing control back to the caller whenever the player is
//! due to act.

use std::collections::{BTreeMap, VecDeque};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::action::{self, ActionResult, PlayerAction};
use crate::combat::{self, StatusKind, has_status, resolve_attack, tick_status};
use crate::data::{BalanceConfig, GameConfig, ItemTemplate, MonsterTemplate};
use crate::dungeon::{DoorState, Level, Position, SpawnKind, Terrain, generate};
use crate::ecs::{
    CombatStats, ComponentSet, Energy, EntityId, EntityRecord, Equipment, Experience, Health,
    Hunger, Inventory, Item, Player, RenderOrder, Registry, Renderable,
};
use crate::error::{ActionError, GameError, GenerationError};
use crate::monster::{AiAction, decide, make_monster};
use crate::object::{Discoveries, ItemKind, RingEffect, curse, make_item, roll_curse};
use crate::rng::{GameRng, level_seed};
use crate::scheduler::TurnScheduler;
use crate::view::RenderView;
use crate::vision::{FovSet, compute_visible};
use crate::MAX_MESSAGES;
use crate::data::colors::CLR_WHITE;

/// Nutrition at which the player is warned about hunger
const HUNGRY_AT: i32 = 150;

/// How a run stands
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunStatus {
    #[default]
    Playing,
    Dead {
        cause: String,
    },
    Won,
}

/// What `GameLoop` stopped for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player is up; call `submit`
    AwaitingInput,
    PlayerDied,
    Won,
}

/// Bounded history of game messages, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageLog {
    entries: VecDeque<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: impl Into<String>) {
        if self.entries.len() == MAX_MESSAGES {
            self.entries.pop_front();
        }
        self.entries.push_back(msg.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The `n` newest messages, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .skip(self.entries.len().saturating_sub(n))
            .map(String::as_str)
    }
}

/// A level the player left, with everything that was on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLevel {
    pub level: Level,
    pub entities: Vec<EntityRecord>,
}

/// Main game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Seed every level of the run derives from
    pub campaign_seed: u64,

    /// Current level
    pub level: Level,

    /// Every live entity on the current level plus carried items
    pub registry: Registry,

    pub scheduler: TurnScheduler,

    /// Random number generator for play (levels use their own)
    pub rng: GameRng,

    pub player: EntityId,

    /// Player turns taken
    pub turns: u64,

    pub status: RunStatus,

    pub messages: MessageLog,

    /// Levels the player has left, by depth
    #[serde(default)]
    pub visited: BTreeMap<u8, StoredLevel>,

    /// Item appearances and the kinds identified so far
    #[serde(default)]
    pub discoveries: Discoveries,

    /// Tunables in force for this run
    pub balance: BalanceConfig,
}

impl GameState {
    /// Start a run on depth 1
    pub fn new_game(config: &GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let generated = generate(1, seed, config)?;
        // Depth 0 is never a level, so its seed is free for play
        let mut rng = GameRng::new(level_seed(seed, 0));
        let discoveries = Discoveries::deal(&config.items, &mut rng);

        let mut state = Self {
            campaign_seed: seed,
            level: generated.level,
            registry: Registry::new(),
            scheduler: TurnScheduler::new(),
            rng,
            player: EntityId(0),
            turns: 0,
            status: RunStatus::Playing,
            messages: MessageLog::new(),
            visited: BTreeMap::new(),
            discoveries,
            balance: config.balance.clone(),
        };
        let start = state.level.entry;
        state.player = state.create_player(start);
        state.instantiate(&generated.spawns, config);
        state.refresh_fov();
        state.message("Welcome, adventurer, to the dungeons of Delve!");
        info!("new game: seed {seed}");
        Ok(state)
    }

    fn create_player(&mut self, pos: Position) -> EntityId {
        let b = self.balance.clone();
        let id = self.registry.create();
        self.registry.attach(id, pos);
        self.registry.attach(id, Health::new(b.player_hp));
        self.registry.attach(
            id,
            CombatStats {
                strength: b.player_strength,
                defense: b.player_defense,
                accuracy: b.player_accuracy,
                evasion: b.player_evasion,
            },
        );
        self.registry.attach(id, Inventory::new(b.inventory_capacity));
        self.registry.attach(id, Energy::new(b.player_speed));
        self.registry.attach(
            id,
            Hunger {
                nutrition: b.starting_nutrition,
                max: b.max_nutrition,
            },
        );
        self.registry.attach(id, Equipment::default());
        self.registry.attach(id, Experience::default());
        self.registry.attach(id, Player::default());
        self.registry.attach(
            id,
            Renderable {
                glyph: '@',
                color: CLR_WHITE,
                name: "player".into(),
                order: RenderOrder::Player,
            },
        );
        id
    }

    /// Turn generator blueprints into entities
    fn instantiate(&mut self, spawns: &[crate::dungeon::Spawn], config: &GameConfig) {
        for spawn in spawns {
            match &spawn.kind {
                SpawnKind::Monster(name) => match config.monster(name) {
                    Some(template) => {
                        self.spawn_monster(template, spawn.pos);
                    }
                    None => warn!("unknown monster {name} in spawn list"),
                },
                SpawnKind::Item(name) => match config.item(name) {
                    Some(template) => {
                        let id = self.spawn_item(template, spawn.pos);
                        if let Some(enchantment) = roll_curse(template, &mut self.rng) {
                            curse(&mut self.registry, id, enchantment);
                        }
                    }
                    None => warn!("unknown item {name} in spawn list"),
                },
            }
        }
    }

    pub fn spawn_monster(&mut self, template: &MonsterTemplate, pos: Position) -> EntityId {
        make_monster(&mut self.registry, template, pos)
    }

    pub fn spawn_item(&mut self, template: &ItemTemplate, pos: Position) -> EntityId {
        make_item(&mut self.registry, template, Some(pos))
    }

    /// Name of an item as the player knows it
    pub fn item_name(&self, id: EntityId) -> String {
        self.registry
            .get::<Item>(id)
            .map_or_else(|| "something".into(), |i| self.discoveries.display_name(i))
    }

    pub fn is_identified(&self, id: EntityId) -> bool {
        self.registry
            .get::<Item>(id)
            .is_none_or(|i| self.discoveries.is_identified(i))
    }

    /// Reveal an item fully: its kind, curse and enchantment
    pub fn identify(&mut self, id: EntityId) {
        let Some(item) = self.registry.get_mut::<Item>(id) else {
            return;
        };
        item.known = true;
        let name = item.name.clone();
        if self.discoveries.learn(&name) {
            debug!("identified {name}");
        }
    }

    /// Items in the player's pack, in inventory order
    pub fn pack(&self) -> Vec<EntityId> {
        self.registry
            .get::<Inventory>(self.player)
            .map(|i| i.items.clone())
            .unwrap_or_default()
    }

    /// Add a message to display
    pub fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg);
    }

    pub fn is_player(&self, id: EntityId) -> bool {
        id == self.player
    }

    /// Name for messages: "you", or "the orc"
    pub fn describe(&self, id: EntityId) -> String {
        if self.is_player(id) {
            return "you".into();
        }
        match self.registry.get::<Renderable>(id) {
            Some(r) => format!("the {}", r.name),
            None => "something".into(),
        }
    }

    /// Where the player stands; `None` once dead
    pub fn player_position(&self) -> Option<Position> {
        self.registry.get::<Position>(self.player).copied()
    }

    /// The creature occupying a tile, if any
    pub fn blocker_at(&self, pos: Position) -> Option<EntityId> {
        self.registry
            .entities_at(pos)
            .into_iter()
            .find(|id| self.registry.has::<Health>(*id))
    }

    /// Items lying on a tile, ascending id
    pub fn items_at(&self, pos: Position) -> Vec<EntityId> {
        self.registry
            .entities_at(pos)
            .into_iter()
            .filter(|id| self.registry.has::<Item>(*id))
            .collect()
    }

    /// Closest monster on a visible tile within `range`, ties to the lowest id
    pub fn nearest_visible_monster(&self, range: i32) -> Option<EntityId> {
        let origin = self.player_position()?;
        self.registry
            .query(ComponentSet::MONSTER | ComponentSet::POSITION)
            .iter()
            .filter_map(|id| {
                let pos = *self.registry.get::<Position>(id)?;
                let visible = self.level.cell(pos).is_some_and(|c| c.is_visible());
                let dist = origin.distance_sq(pos);
                (visible && dist <= range * range).then_some((dist, id))
            })
            .min()
            .map(|(_, id)| id)
    }

    /// Recompute the player's field of view and what they remember
    pub fn refresh_fov(&mut self) {
        let Some(origin) = self.player_position() else {
            return;
        };
        let visible: FovSet = if has_status(self, self.player, StatusKind::Blindness) {
            FovSet::from([origin])
        } else {
            compute_visible(origin, self.balance.torch_radius, &self.level)
        };
        for &pos in &visible {
            self.level.remember_item(pos, None);
        }
        let seen_items: Vec<(Position, char)> = self
            .registry
            .iter::<Item>()
            .filter_map(|(id, item)| {
                let pos = *self.registry.get::<Position>(id)?;
                visible.contains(&pos).then_some((pos, item.kind.symbol()))
            })
            .collect();
        for (pos, glyph) in seen_items {
            self.level.remember_item(pos, Some(glyph));
        }
        self.level.apply_fov(&visible);
    }

    /// Move the player to another depth, storing the level being left
    pub fn change_level(&mut self, depth: u8, config: &GameConfig) -> Result<(), GenerationError> {
        let from = self.level.depth;
        let (level, records, spawns) = match self.visited.remove(&depth) {
            Some(stored) => (stored.level, stored.entities, Vec::new()),
            None => {
                let generated = generate(depth, self.campaign_seed, config)?;
                (generated.level, Vec::new(), generated.spawns)
            }
        };

        let departing: Vec<EntityId> = self
            .registry
            .query(ComponentSet::POSITION)
            .iter()
            .filter(|id| *id != self.player)
            .collect();
        let mut stored = Vec::with_capacity(departing.len());
        for id in departing {
            if let Some(record) = self.registry.snapshot_entity(id) {
                stored.push(record);
            }
            self.scheduler.forget(id);
            self.registry.destroy(id);
        }
        let old = std::mem::replace(&mut self.level, level);
        self.visited.insert(
            from,
            StoredLevel {
                level: old,
                entities: stored,
            },
        );

        for record in records {
            self.registry.spawn_record(record);
        }
        self.instantiate(&spawns, config);

        let arrival = if depth > from {
            self.level.upstairs.unwrap_or(self.level.entry)
        } else {
            self.level.downstairs.unwrap_or(self.level.entry)
        };
        let arrival = self.free_spot_near(arrival);
        self.registry.attach(self.player, arrival);

        let verb = if depth > from { "descend" } else { "climb" };
        self.message(format!("You {verb} to depth {depth}."));
        info!("player moved from depth {from} to depth {depth}");
        self.refresh_fov();
        Ok(())
    }

    /// `pos` if nobody stands there, else the first free walkable neighbour
    pub(crate) fn free_spot_near(&self, pos: Position) -> Position {
        let free = |p: Position| {
            self.level.is_walkable(p) && self.blocker_at(p).is_none_or(|id| id == self.player)
        };
        if free(pos) {
            return pos;
        }
        pos.neighbours8().into_iter().find(|p| free(*p)).unwrap_or(pos)
    }

    /// Per-turn bookkeeping after the player acts: hunger and regeneration
    fn player_upkeep(&mut self) {
        let player = self.player;
        let mut starving = false;
        if let Some(hunger) = self.registry.get_mut::<Hunger>(player) {
            hunger.nutrition = (hunger.nutrition - 1).max(0);
            starving = hunger.is_starving();
            if hunger.nutrition == HUNGRY_AT {
                self.message("You are getting hungry.");
            }
        }
        if starving {
            self.message("You are starving!");
            if combat::apply_damage(self, player, 1, None, "starved to death") {
                return;
            }
        }

        let ring = self
            .registry
            .get::<Equipment>(player)
            .and_then(|e| e.ring)
            .and_then(|id| self.registry.get::<Item>(id))
            .map(|i| i.kind);
        if let Some(ItemKind::Ring(RingEffect::Regeneration { interval })) = ring
            && interval > 0
            && self.turns % u64::from(interval) == 0
            && let Some(health) = self.registry.get_mut::<Health>(player)
        {
            health.heal(1);
        }
    }

    fn move_monster(&mut self, id: EntityId, to: Position) {
        match self.level.terrain(to) {
            Terrain::Door(DoorState::Closed) => {
                self.level.set_terrain(to, Terrain::Door(DoorState::Open));
                if self.level.cell(to).is_some_and(|c| c.is_visible()) {
                    let name = combat::capitalize(&self.describe(id));
                    self.message(format!("{name} opens a door."));
                }
            }
            t if t.is_walkable() && self.blocker_at(to).is_none() => {
                self.registry.attach(id, to);
            }
            _ => {}
        }
    }
}

/// Game loop controller
///
/// Owns the state for the whole run. Between calls the caller may look at
/// the world through `state()` or `view()`.
pub struct GameLoop {
    state: GameState,
    config: GameConfig,
    awaiting: bool,
}

impl GameLoop {
    /// Start a fresh run
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        let state = GameState::new_game(&config, seed)?;
        Ok(Self {
            state,
            config,
            awaiting: false,
        })
    }

    /// Resume a saved run
    pub fn from_state(state: GameState, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            state,
            config,
            awaiting: false,
        })
    }

    /// Get reference to game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Consume the game loop and return the owned game state
    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.awaiting
    }

    /// What a renderer needs to draw the current turn
    pub fn view(&self) -> RenderView {
        RenderView::build(&self.state)
    }

    /// Run monster turns until the player is up or the run is over
    pub fn advance(&mut self) -> TurnOutcome {
        loop {
            if let Some(outcome) = self.finished() {
                self.awaiting = false;
                return outcome;
            }
            if self.awaiting {
                return TurnOutcome::AwaitingInput;
            }
            let Some(actor) = self.state.scheduler.next_actor(&mut self.state.registry) else {
                warn!("no entity can act; waiting on the player");
                self.awaiting = true;
                return TurnOutcome::AwaitingInput;
            };
            if self.state.is_player(actor) {
                self.awaiting = true;
                return TurnOutcome::AwaitingInput;
            }
            self.monster_turn(actor);
        }
    }

    /// Perform the player's action, then run the world until they are up again
    ///
    /// A rejected action consumes no time and leaves the state unchanged.
    pub fn submit(&mut self, action: PlayerAction) -> Result<TurnOutcome, ActionError> {
        if self.state.status != RunStatus::Playing {
            return Err(ActionError::GameOver);
        }
        if !self.awaiting {
            return Err(ActionError::NotAwaitingInput);
        }
        debug!("turn {}: player {action:?}", self.state.turns);

        if let ActionResult::Travel(depth) = action::execute(&mut self.state, action)? {
            self.state
                .change_level(depth, &self.config)
                .map_err(|err| {
                    warn!("cannot enter depth {depth}: {err}");
                    ActionError::LevelUnavailable { depth }
                })?;
        }

        self.awaiting = false;
        self.end_player_turn();
        Ok(self.advance())
    }

    fn end_player_turn(&mut self) {
        let state = &mut self.state;
        let player = state.player;
        if !state.registry.is_alive(player) {
            return;
        }
        state
            .scheduler
            .complete_action(&mut state.registry, player, state.balance.action_cost);
        state.turns += 1;
        state.player_upkeep();
        if state.registry.is_alive(player) && tick_status(state, player) {
            state.refresh_fov();
        }
    }

    fn monster_turn(&mut self, id: EntityId) {
        let state = &mut self.state;
        match decide(state, id) {
            AiAction::Wait => {}
            AiAction::Move(to) => state.move_monster(id, to),
            AiAction::Attack(target) => {
                resolve_attack(state, id, target);
            }
        }
        if state.registry.is_alive(id) {
            state
                .scheduler
                .complete_action(&mut state.registry, id, state.balance.action_cost);
            tick_status(state, id);
        } else {
            state.scheduler.forget(id);
        }
    }

    fn finished(&self) -> Option<TurnOutcome> {
        match self.state.status {
            RunStatus::Playing => None,
            RunStatus::Dead { .. } => Some(TurnOutcome::PlayerDied),
            RunStatus::Won => Some(TurnOutcome::Won),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::arena;
    use super::*;

    #[test]
    fn test_new_game_places_player_at_entry() {
        let config = GameConfig::builtin();
        let state = GameState::new_game(&config, 42).unwrap();
        assert_eq!(state.player_position(), Some(state.level.entry));
        assert_eq!(state.level.depth, 1);
        assert_eq!(state.status, RunStatus::Playing);
        assert!(state.level.cell(state.level.entry).unwrap().is_visible());
        assert!(state.messages.last().is_some());
    }

    #[test]
    fn test_invalid_config_rejected_before_play() {
        let mut config = GameConfig::builtin();
        config.monsters.clear();
        assert!(matches!(
            GameState::new_game(&config, 1),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut log = MessageLog::new();
        for i in 0..MAX_MESSAGES + 10 {
            log.push(format!("m{i}"));
        }
        assert_eq!(log.len(), MAX_MESSAGES);
        assert_eq!(log.iter().next(), Some("m10"));
        let recent: Vec<&str> = log.recent(2).collect();
        assert_eq!(recent.len(), 2);
        assert_eq!(log.last(), recent.last().copied());
    }

    #[test]
    fn test_submit_requires_awaiting_input() {
        let mut game = GameLoop::new_game(GameConfig::builtin(), 3).unwrap();
        assert_eq!(
            game.submit(PlayerAction::Wait),
            Err(ActionError::NotAwaitingInput)
        );
        assert_eq!(game.advance(), TurnOutcome::AwaitingInput);
        assert!(game.submit(PlayerAction::Wait).is_ok());
        assert_eq!(game.state().turns, 1);
    }

    #[test]
    fn test_rejected_action_takes_no_time() {
        let mut game = GameLoop::new_game(GameConfig::builtin(), 3).unwrap();
        game.advance();
        let before = game.state().clone();
        assert_eq!(
            game.submit(PlayerAction::Drop(0)),
            Err(ActionError::EmptyInventory)
        );
        assert_eq!(game.state(), &before);
        assert!(game.is_awaiting_input());
    }

    #[test]
    fn test_hunger_ticks_down() {
        let mut state = arena();
        let start = state.registry.get::<Hunger>(state.player).unwrap().nutrition;
        state.player_upkeep();
        assert_eq!(
            state.registry.get::<Hunger>(state.player).unwrap().nutrition,
            start - 1
        );
    }

    #[test]
    fn test_starvation_hurts() {
        let mut state = arena();
        let player = state.player;
        state.registry.get_mut::<Hunger>(player).unwrap().nutrition = 0;
        let hp = state.registry.get::<Health>(player).unwrap().current;
        state.player_upkeep();
        assert_eq!(state.registry.get::<Health>(player).unwrap().current, hp - 1);
        assert_eq!(state.messages.last(), Some("You are starving!"));
    }

    #[test]
    fn test_monster_opens_closed_door() {
        let mut state = arena();
        let config = GameConfig::builtin();
        let door = Position::new(10, 5);
        state.level.set_terrain(door, Terrain::Door(DoorState::Closed));
        let rat = state.spawn_monster(config.monster("rat").unwrap(), Position::new(9, 5));
        state.move_monster(rat, door);
        assert_eq!(state.level.terrain(door), Terrain::Door(DoorState::Open));
        assert_eq!(state.registry.get::<Position>(rat), Some(&Position::new(9, 5)));
        state.move_monster(rat, door);
        assert_eq!(state.registry.get::<Position>(rat), Some(&door));
    }

    #[test]
    fn test_change_level_round_trip_keeps_entities() {
        let config = GameConfig::builtin();
        let mut state = GameState::new_game(&config, 42).unwrap();
        let downstairs = state.level.downstairs.unwrap();
        let monsters_before = state.registry.query(ComponentSet::MONSTER).len();

        state.registry.attach(state.player, downstairs);
        state.change_level(2, &config).unwrap();
        assert_eq!(state.level.depth, 2);
        assert_eq!(state.player_position(), state.level.upstairs);
        assert!(state.visited.contains_key(&1));

        let upstairs = state.level.upstairs.unwrap();
        state.registry.attach(state.player, upstairs);
        state.change_level(1, &config).unwrap();
        assert_eq!(state.level.depth, 1);
        assert_eq!(state.player_position(), Some(downstairs));
        assert_eq!(state.registry.query(ComponentSet::MONSTER).len(), monsters_before);
        assert!(state.visited.contains_key(&2));
    }

    #[test]
    fn test_blind_player_sees_only_own_tile() {
        let mut state = arena();
        let player = state.player;
        combat::apply_status(&mut state, player, StatusKind::Blindness, 3);
        state.refresh_fov();
        let seen = state
            .level
            .positions()
            .filter(|p| state.level.cell(*p).unwrap().is_visible())
            .count();
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_nearest_visible_monster() {
        let mut state = arena();
        let config = GameConfig::builtin();
        let far = state.spawn_monster(config.monster("rat").unwrap(), Position::new(12, 5));
        let near = state.spawn_monster(config.monster("rat").unwrap(), Position::new(8, 5));
        state.refresh_fov();
        assert_eq!(state.nearest_visible_monster(10), Some(near));
        state.registry.destroy(near);
        assert_eq!(state.nearest_visible_monster(10), Some(far));
        assert_eq!(state.nearest_visible_monster(3), None);
    }

    #[test]
    fn test_appearances_follow_the_seed() {
        let config = GameConfig::builtin();
        let a = GameState::new_game(&config, 42).unwrap();
        let b = GameState::new_game(&config, 42).unwrap();
        assert_eq!(a.discoveries, b.discoveries);
        assert!(a.discoveries.appearance("healing potion").is_some());
        assert!(a.discoveries.appearance("food ration").is_none());
        assert_eq!(a.discoveries.known().count(), 0);
    }

    #[test]
    fn test_generated_gear_can_come_cursed() {
        let mut config = GameConfig::builtin();
        for template in &mut config.items {
            if template.kind.class().is_enchantable() {
                template.cursed_pct = 100;
            }
        }
        let mut gear = 0;
        for seed in 0..20 {
            let state = GameState::new_game(&config, seed).unwrap();
            for (_, item) in state.registry.iter::<Item>() {
                if item.kind.class().is_enchantable() {
                    gear += 1;
                    assert!(item.cursed);
                    assert!((-3..=-1).contains(&item.enchantment));
                    assert!(!item.known);
                } else {
                    assert!(!item.cursed);
                }
            }
        }
        assert!(gear > 0);
    }

    #[test]
    fn test_identify_reveals_kind_and_curse() {
        let mut state = arena();
        let config = GameConfig::builtin();
        let regeneration = config.item("ring of regeneration").unwrap();
        let ring = state.spawn_item(regeneration, Position::new(6, 6));
        let other = state.spawn_item(regeneration, Position::new(7, 7));
        let sword = state.spawn_item(config.item("sword").unwrap(), Position::new(8, 8));
        curse(&mut state.registry, sword, -3);
        assert_ne!(state.item_name(ring), "ring of regeneration");
        assert_eq!(state.item_name(sword), "sword");

        state.identify(ring);
        assert_eq!(state.item_name(other), "ring of regeneration");
        state.identify(sword);
        assert_eq!(state.item_name(sword), "cursed -3 sword");
        assert!(state.is_identified(other) && state.is_identified(sword));
    }
}
