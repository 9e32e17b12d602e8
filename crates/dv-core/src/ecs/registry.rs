//! Entity registry
//!
//! Entities are bare ids; each component kind lives in its own ordered
//! storage keyed by id. Ids are handed out monotonically and never reused
//! by the same registry.

use std::collections::{BTreeMap, BTreeSet};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::components::*;
use crate::combat::StatusEffects;
use crate::dungeon::Position;

/// Opaque entity identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Component kinds, one per storage
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum ComponentKind {
    Position,
    Health,
    CombatStats,
    Inventory,
    Renderable,
    AiState,
    StatusEffects,
    Energy,
    Item,
    Equipment,
    Player,
    Monster,
    Experience,
    Hunger,
}

bitflags! {
    /// A set of component kinds, used to filter queries
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentSet: u32 {
        const POSITION = 1 << 0;
        const HEALTH = 1 << 1;
        const COMBAT_STATS = 1 << 2;
        const INVENTORY = 1 << 3;
        const RENDERABLE = 1 << 4;
        const AI_STATE = 1 << 5;
        const STATUS_EFFECTS = 1 << 6;
        const ENERGY = 1 << 7;
        const ITEM = 1 << 8;
        const EQUIPMENT = 1 << 9;
        const PLAYER = 1 << 10;
        const MONSTER = 1 << 11;
        const EXPERIENCE = 1 << 12;
        const HUNGER = 1 << 13;
    }
}

impl ComponentKind {
    pub const fn flag(&self) -> ComponentSet {
        ComponentSet::from_bits_truncate(1 << *self as u32)
    }
}

impl From<ComponentKind> for ComponentSet {
    fn from(kind: ComponentKind) -> Self {
        kind.flag()
    }
}

/// Typed access to one storage of the registry
pub trait Component: Clone + Sized + 'static {
    const KIND: ComponentKind;

    fn storage(registry: &Registry) -> &BTreeMap<EntityId, Self>;
    fn storage_mut(registry: &mut Registry) -> &mut BTreeMap<EntityId, Self>;
    fn into_any(self) -> AnyComponent;
}

/// Serialize id-keyed storages as `[id, value]` pairs (JSON keys must be strings)
mod entity_map_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S, T>(map: &BTreeMap<EntityId, T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<BTreeMap<EntityId, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let pairs: Vec<(EntityId, T)> = Vec::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

macro_rules! registry_storages {
    ($($field:ident: $ty:ty => $kind:ident),* $(,)?) => {
        /// All entities and their components
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        pub struct Registry {
            next_id: u32,
            alive: BTreeSet<EntityId>,
            $(
                #[serde(with = "entity_map_serde", default)]
                $field: BTreeMap<EntityId, $ty>,
            )*
        }

        /// A component of any kind, for moving whole entities around
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum AnyComponent {
            $($kind($ty),)*
        }

        $(
            impl Component for $ty {
                const KIND: ComponentKind = ComponentKind::$kind;

                fn storage(registry: &Registry) -> &BTreeMap<EntityId, Self> {
                    &registry.$field
                }

                fn storage_mut(registry: &mut Registry) -> &mut BTreeMap<EntityId, Self> {
                    &mut registry.$field
                }

                fn into_any(self) -> AnyComponent {
                    AnyComponent::$kind(self)
                }
            }
        )*

        impl Registry {
            /// Kinds attached to an entity
            pub fn kinds(&self, id: EntityId) -> ComponentSet {
                let mut set = ComponentSet::empty();
                $(
                    if self.$field.contains_key(&id) {
                        set |= ComponentKind::$kind.flag();
                    }
                )*
                set
            }

            /// Detach a component by kind; returns whether one was present
            pub fn remove(&mut self, id: EntityId, kind: ComponentKind) -> bool {
                match kind {
                    $(ComponentKind::$kind => self.$field.remove(&id).is_some(),)*
                }
            }

            fn remove_all(&mut self, id: EntityId) {
                $(self.$field.remove(&id);)*
            }

            /// Copy out every component of an entity
            pub fn snapshot_entity(&self, id: EntityId) -> Option<EntityRecord> {
                if !self.is_alive(id) {
                    return None;
                }
                let mut components = Vec::new();
                $(
                    if let Some(c) = self.$field.get(&id) {
                        components.push(AnyComponent::$kind(c.clone()));
                    }
                )*
                Some(EntityRecord { components })
            }

            fn attach_any(&mut self, id: EntityId, component: AnyComponent) {
                match component {
                    $(AnyComponent::$kind(c) => self.attach(id, c),)*
                }
            }
        }
    };
}

registry_storages! {
    positions: Position => Position,
    healths: Health => Health,
    combat_stats: CombatStats => CombatStats,
    inventories: Inventory => Inventory,
    renderables: Renderable => Renderable,
    ai_states: AiState => AiState,
    status_effects: StatusEffects => StatusEffects,
    energies: Energy => Energy,
    items: Item => Item,
    equipment: Equipment => Equipment,
    players: Player => Player,
    monsters: Monster => Monster,
    experience: Experience => Experience,
    hungers: Hunger => Hunger,
}

/// Detached copy of an entity's components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub components: Vec<AnyComponent>,
}

/// Snapshot of the ids matching a query, ascending
///
/// Taken when the query runs, so the registry may be mutated while
/// iterating. Iterate again with [`Query::iter`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    ids: Vec<EntityId>,
}

impl Query {
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, EntityId>> {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn first(&self) -> Option<EntityId> {
        self.ids.first().copied()
    }

    pub fn as_slice(&self) -> &[EntityId] {
        &self.ids
    }
}

impl IntoIterator for Query {
    type Item = EntityId;
    type IntoIter = std::vec::IntoIter<EntityId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = EntityId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, EntityId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id
    pub fn create(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let fresh = self.alive.insert(id);
        assert!(fresh, "entity id {id} allocated twice");
        id
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.alive.contains(&id)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Attach a component, replacing one of the same kind
    ///
    /// # Panics
    ///
    /// Panics if `id` is not alive.
    pub fn attach<T: Component>(&mut self, id: EntityId, component: T) {
        assert!(
            self.is_alive(id),
            "attach {} to dead entity {id}",
            T::KIND
        );
        T::storage_mut(self).insert(id, component);
    }

    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        T::storage(self).get(&id)
    }

    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        T::storage_mut(self).get_mut(&id)
    }

    pub fn has<T: Component>(&self, id: EntityId) -> bool {
        T::storage(self).contains_key(&id)
    }

    /// Detach and return a component
    pub fn take<T: Component>(&mut self, id: EntityId) -> Option<T> {
        T::storage_mut(self).remove(&id)
    }

    /// Destroy an entity and all its components
    ///
    /// Returns `true` if the entity was alive, `false` if it was already gone.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        if !self.alive.remove(&id) {
            return false;
        }
        self.remove_all(id);
        true
    }

    /// Ids of live entities holding every kind in `required`, ascending
    pub fn query(&self, required: ComponentSet) -> Query {
        let ids = self
            .alive
            .iter()
            .copied()
            .filter(|id| self.kinds(*id).contains(required))
            .collect();
        Query { ids }
    }

    /// Entities standing or lying at a position, ascending
    pub fn entities_at(&self, pos: Position) -> Vec<EntityId> {
        self.positions
            .iter()
            .filter(|(_, p)| **p == pos)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Create an entity from a record; returns the new id
    pub fn spawn_record(&mut self, record: EntityRecord) -> EntityId {
        let id = self.create();
        for component in record.components {
            self.attach_any(id, component);
        }
        id
    }

    /// Iterate one storage in id order
    pub fn iter<T: Component>(&self) -> impl Iterator<Item = (EntityId, &T)> {
        T::storage(self).iter().map(|(id, c)| (*id, c))
    }
}

impl AnyComponent {
    pub fn kind(&self) -> ComponentKind {
        match self {
            AnyComponent::Position(_) => ComponentKind::Position,
            AnyComponent::Health(_) => ComponentKind::Health,
            AnyComponent::CombatStats(_) => ComponentKind::CombatStats,
            AnyComponent::Inventory(_) => ComponentKind::Inventory,
            AnyComponent::Renderable(_) => ComponentKind::Renderable,
            AnyComponent::AiState(_) => ComponentKind::AiState,
            AnyComponent::StatusEffects(_) => ComponentKind::StatusEffects,
            AnyComponent::Energy(_) => ComponentKind::Energy,
            AnyComponent::Item(_) => ComponentKind::Item,
            AnyComponent::Equipment(_) => ComponentKind::Equipment,
            AnyComponent::Player(_) => ComponentKind::Player,
            AnyComponent::Monster(_) => ComponentKind::Monster,
            AnyComponent::Experience(_) => ComponentKind::Experience,
            AnyComponent::Hunger(_) => ComponentKind::Hunger,
        }
    }
}
