//! Entity type and identifier allocation.
//!
//! An [`Entity`] is a lightweight `u64` identifier with no inherent data.
//! The [`EntityManager`] is the single source of truth for which identifiers
//! are currently live.

use std::collections::BTreeSet;

use tracing::trace;

use crate::error::EcsError;

/// A unique entity identifier.
///
/// Entities are pure identifiers — they carry no data of their own. Components
/// are attached to entities to give them meaning.
///
/// No two simultaneously live entities share a value, but a value may be
/// handed out again after the entity holding it has been destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(pub u64);

impl Entity {
    /// The null / invalid entity sentinel.
    pub const INVALID: Entity = Entity(0);

    /// Create an entity from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is not the [`Entity::INVALID`] sentinel.
    ///
    /// This says nothing about liveness; ask the [`EntityManager`] for that.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Issues, recycles, and validates entity identifiers.
///
/// Fresh identifiers come from a monotonically increasing counter starting at
/// 1. Destroyed identifiers go onto a free list, and [`create_entity`] always
/// prefers the smallest freed identifier over minting a new one.
///
/// [`create_entity`]: EntityManager::create_entity
#[derive(Debug)]
pub struct EntityManager {
    /// Next never-issued identifier.
    next_id: u64,
    /// Highest identifier this manager may issue.
    id_limit: u64,
    /// Identifiers currently considered valid.
    live: BTreeSet<Entity>,
    /// Destroyed identifiers available for reuse, smallest first.
    free: BTreeSet<u64>,
}

impl EntityManager {
    /// Creates a manager that may use the whole `1..=u64::MAX` identifier space.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_limit(u64::MAX)
    }

    /// Creates a manager that never issues an identifier above `max_id`.
    ///
    /// Engines that cap their entity count use this; once every identifier in
    /// `1..=max_id` is live, [`EntityManager::create_entity`] reports
    /// [`EcsError::CapacityExceeded`].
    #[must_use]
    pub fn with_id_limit(max_id: u64) -> Self {
        Self {
            next_id: 1,
            id_limit: max_id,
            live: BTreeSet::new(),
            free: BTreeSet::new(),
        }
    }

    /// Returns the highest identifier this manager may issue.
    #[must_use]
    pub fn id_limit(&self) -> u64 {
        self.id_limit
    }

    /// Allocates a fresh live entity.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExceeded`] if the free list is empty and
    /// the counter has passed the identifier limit.
    pub fn create_entity(&mut self) -> Result<Entity, EcsError> {
        let id = match self.free.pop_first() {
            Some(id) => id,
            None => {
                if self.next_id == 0 || self.next_id > self.id_limit {
                    return Err(EcsError::CapacityExceeded {
                        limit: self.id_limit,
                    });
                }
                let id = self.next_id;
                // Wraps to 0 after u64::MAX, which the check above treats as exhausted.
                self.next_id = self.next_id.wrapping_add(1);
                id
            }
        };

        let entity = Entity(id);
        let inserted = self.live.insert(entity);
        debug_assert!(inserted, "allocator handed out a live identifier");
        trace!(entity = id, live = self.live.len(), "entity created");
        Ok(entity)
    }

    /// Destroys a live entity and makes its identifier available for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::EntityNotFound`] if `entity` is not live, which
    /// includes [`Entity::INVALID`] and already-destroyed identifiers.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        if !entity.is_valid() || !self.live.remove(&entity) {
            return Err(EcsError::EntityNotFound(entity));
        }
        self.free.insert(entity.0);
        trace!(entity = entity.0, live = self.live.len(), "entity destroyed");
        Ok(())
    }

    /// Returns `true` iff `entity` is currently live.
    #[must_use]
    pub fn is_entity_valid(&self, entity: Entity) -> bool {
        entity.is_valid() && self.live.contains(&entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.live.len()
    }

    /// Returns the number of identifiers waiting on the free list.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Iterates live entities in ascending identifier order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.live.iter().copied()
    }

    /// Destroys every entity and resets the allocator to its initial state.
    pub fn clear(&mut self) {
        self.live.clear();
        self.free.clear();
        self.next_id = 1;
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
