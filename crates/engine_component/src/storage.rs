//! Typed component storage.
//!
//! A [`ComponentStore<T>`] holds at most one `T` per entity in a densely
//! packed array. Removal swaps the last element into the hole so the array
//! never has gaps, and two maps translate between entities and slots.

use std::any::Any;
use std::collections::HashMap;

use tracing::trace;

use crate::component::{Component, ComponentTypeId};
use crate::entity::Entity;
use crate::error::EcsError;

/// Type-erased view of a component store.
///
/// The registry keeps one boxed store per component type and uses this trait
/// for the operations that do not need to know `T`: destruction fan-out and
/// signature matching.
pub trait ComponentStorage: Send + Sync {
    /// The type identifier of the stored component.
    fn component_type_id(&self) -> ComponentTypeId;

    /// The human-readable name of the stored component.
    fn type_name(&self) -> &'static str;

    /// Returns `true` if `entity` has a component in this store.
    fn contains(&self, entity: Entity) -> bool;

    /// Drops `entity`'s component if present; no-op otherwise.
    fn entity_destroyed(&mut self, entity: Entity);

    /// Entities that have a component in this store, in storage order.
    fn stored_entities(&self) -> &[Entity];

    /// Number of stored components.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every component.
    fn clear(&mut self);

    /// Upcast for downcasting to the concrete store.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete store.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Dense storage for components of type `T`, keyed by entity.
#[derive(Debug)]
pub struct ComponentStore<T: Component> {
    /// Packed component values. `components[i]` belongs to `entities[i]`.
    components: Vec<T>,
    /// Owner of each packed slot.
    entities: Vec<Entity>,
    /// Slot of each entity's component.
    index: HashMap<Entity, usize>,
}

impl<T: Component> ComponentStore<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create an empty store with room for `capacity` components.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            components: Vec::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Attaches `value` to `entity`, overwriting any existing component.
    ///
    /// Entity liveness is not checked here; that is the caller's job. The
    /// reserved [`Entity::INVALID`] is never stored: the call is a no-op.
    pub fn add_component(&mut self, entity: Entity, value: T) {
        if !entity.is_valid() {
            trace!(component = T::type_name(), "ignored component for invalid entity");
            return;
        }
        if let Some(&slot) = self.index.get(&entity) {
            self.components[slot] = value;
            trace!(entity = entity.0, component = T::type_name(), "component overwritten");
            return;
        }

        let slot = self.components.len();
        self.components.push(value);
        self.entities.push(entity);
        self.index.insert(entity, slot);
        trace!(entity = entity.0, component = T::type_name(), "component added");
    }

    /// Detaches and returns `entity`'s component, if any.
    pub fn take_component(&mut self, entity: Entity) -> Option<T> {
        let slot = self.index.remove(&entity)?;
        let value = self.components.swap_remove(slot);
        self.entities.swap_remove(slot);

        // The former last element now lives in `slot`; repoint it.
        if let Some(&moved) = self.entities.get(slot) {
            self.index.insert(moved, slot);
        }
        trace!(entity = entity.0, component = T::type_name(), "component removed");
        Some(value)
    }

    /// Detaches `entity`'s component. Returns whether one was present.
    pub fn remove_component(&mut self, entity: Entity) -> bool {
        self.take_component(entity).is_some()
    }

    /// Returns `true` if `entity` has a component in this store.
    #[must_use]
    pub fn has_component(&self, entity: Entity) -> bool {
        entity.is_valid() && self.index.contains_key(&entity)
    }

    /// Returns a reference to `entity`'s component.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotFound`] if none is attached.
    pub fn get_component(&self, entity: Entity) -> Result<&T, EcsError> {
        self.index
            .get(&entity)
            .map(|&slot| &self.components[slot])
            .ok_or_else(|| T::not_found(entity))
    }

    /// Returns a mutable reference to `entity`'s component.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotFound`] if none is attached.
    pub fn get_component_mut(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        match self.index.get(&entity) {
            Some(&slot) => Ok(&mut self.components[slot]),
            None => Err(T::not_found(entity)),
        }
    }

    /// Drops `entity`'s component if present; no-op otherwise.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        self.take_component(entity);
    }

    /// Number of stored components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Entities that currently have a component here, in storage order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterates `(entity, component)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    /// Iterates `(entity, component)` pairs mutably in storage order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.components.iter_mut())
    }
}

impl<T: Component> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentStorage for ComponentStore<T> {
    fn component_type_id(&self) -> ComponentTypeId {
        T::component_type_id()
    }

    fn type_name(&self) -> &'static str {
        T::type_name()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.has_component(entity)
    }

    fn entity_destroyed(&mut self, entity: Entity) {
        ComponentStore::entity_destroyed(self, entity);
    }

    fn stored_entities(&self) -> &[Entity] {
        &self.entities
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn clear(&mut self) {
        self.components.clear();
        self.entities.clear();
        self.index.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
