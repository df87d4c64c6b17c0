//! The set of component stores owned by one world.
//!
//! [`ComponentRegistry`] maps each [`ComponentTypeId`] to a boxed
//! [`ComponentStorage`]. Typed calls downcast to the concrete
//! [`ComponentStore<T>`]; destruction fan-out and signature matching go
//! through the type-erased trait.

use std::collections::HashMap;

use tracing::debug;

use crate::component::{Component, ComponentTypeId};
use crate::entity::Entity;
use crate::error::EcsError;
use crate::signature::Signature;
use crate::storage::{ComponentStorage, ComponentStore};

/// Registry of every component store in a world.
#[derive(Default)]
pub struct ComponentRegistry {
    stores: HashMap<ComponentTypeId, Box<dyn ComponentStorage>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    /// Ensures a store for `T` exists.
    ///
    /// Registering the same type twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidArgument`] if a different component type
    /// already owns `T`'s type identifier.
    pub fn register<T: Component>(&mut self) -> Result<(), EcsError> {
        self.store_mut_or_insert::<T>().map(|_| ())
    }

    /// Returns `true` if a store for `T` exists.
    #[must_use]
    pub fn is_registered<T: Component>(&self) -> bool {
        self.stores.contains_key(&T::component_type_id())
    }

    /// Number of registered component types.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.stores.len()
    }

    /// Returns the store for `T`, if registered.
    #[must_use]
    pub fn store<T: Component>(&self) -> Option<&ComponentStore<T>> {
        self.stores
            .get(&T::component_type_id())
            .and_then(|s| s.as_any().downcast_ref::<ComponentStore<T>>())
    }

    /// Returns the store for `T` mutably, if registered.
    #[must_use]
    pub fn store_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
        self.stores
            .get_mut(&T::component_type_id())
            .and_then(|s| s.as_any_mut().downcast_mut::<ComponentStore<T>>())
    }

    /// Attaches `value` to `entity`, registering `T` on first use.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::EntityNotFound`] for [`Entity::INVALID`] and
    /// [`EcsError::InvalidArgument`] on a type identifier collision.
    pub fn add<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        if !entity.is_valid() {
            return Err(EcsError::EntityNotFound(entity));
        }
        self.store_mut_or_insert::<T>()?.add_component(entity, value);
        Ok(())
    }

    /// Detaches `entity`'s `T`. Returns whether one was present.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> bool {
        self.store_mut::<T>()
            .is_some_and(|store| store.remove_component(entity))
    }

    /// Returns `true` if `entity` has a `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.store::<T>()
            .is_some_and(|store| store.has_component(entity))
    }

    /// Returns `entity`'s `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotFound`] if none is attached.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.store::<T>()
            .ok_or_else(|| T::not_found(entity))?
            .get_component(entity)
    }

    /// Returns `entity`'s `T` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotFound`] if none is attached.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.store_mut::<T>()
            .ok_or_else(|| T::not_found(entity))?
            .get_component_mut(entity)
    }

    /// Type-erased presence check used by signature matching.
    ///
    /// An unregistered type is simply absent on every entity.
    #[must_use]
    pub fn contains(&self, type_id: ComponentTypeId, entity: Entity) -> bool {
        self.stores
            .get(&type_id)
            .is_some_and(|store| store.contains(entity))
    }

    /// Returns `true` if `entity` has every component `signature` requires.
    #[must_use]
    pub fn matches(&self, signature: &Signature, entity: Entity) -> bool {
        signature
            .required_types()
            .all(|ty| self.contains(ty, entity))
    }

    /// Entities that have every component `signature` requires, ascending.
    ///
    /// Candidates come from the smallest required store, so the cost scales
    /// with the rarest component rather than with the world size. An empty
    /// signature or an unregistered type matches nothing.
    #[must_use]
    pub fn matching(&self, signature: &Signature) -> Vec<Entity> {
        let mut smallest: Option<&dyn ComponentStorage> = None;
        for ty in signature.required_types() {
            let Some(store) = self.stores.get(&ty) else {
                return Vec::new();
            };
            if smallest.is_none_or(|s| store.len() < s.len()) {
                smallest = Some(&**store);
            }
        }

        let Some(candidates) = smallest else {
            return Vec::new();
        };
        let mut matched: Vec<Entity> = candidates
            .stored_entities()
            .iter()
            .copied()
            .filter(|e| self.matches(signature, *e))
            .collect();
        matched.sort_unstable();
        matched
    }

    /// Tells every store that `entity` has been destroyed.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for store in self.stores.values_mut() {
            store.entity_destroyed(entity);
        }
    }

    /// Names and sizes of every store, sorted by name.
    #[must_use]
    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        let mut rows: Vec<_> = self
            .stores
            .values()
            .map(|store| (store.type_name(), store.len()))
            .collect();
        rows.sort_unstable();
        rows
    }

    /// Empties every store while keeping the types registered.
    pub fn clear(&mut self) {
        for store in self.stores.values_mut() {
            store.clear();
        }
    }

    fn store_mut_or_insert<T: Component>(&mut self) -> Result<&mut ComponentStore<T>, EcsError> {
        let type_id = T::component_type_id();
        let store = self.stores.entry(type_id).or_insert_with(|| {
            debug!(component = T::type_name(), %type_id, "registered component type");
            Box::new(ComponentStore::<T>::new())
        });

        let existing = store.type_name();
        store
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
            .ok_or_else(|| {
                EcsError::invalid(format!(
                    "component '{}' collides with '{existing}' on type id {type_id}",
                    T::type_name()
                ))
            })
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("stores", &self.summary())
            .finish()
    }
}
