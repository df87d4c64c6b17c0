/// ECS World — the caller-owned context holding every piece of engine state.
///
/// A world bundles the live entity set, the per-type component stores, and
/// the ordered system list. Nothing is global: two worlds never observe each
/// other's entities.
use engine_component::{
    Component, ComponentRegistry, ComponentStore, EcsError, Entity, EntityManager, Signature,
};
use engine_system::{System, SystemConfig, SystemContext, SystemId, SystemManager};
use tracing::{debug, info, trace};

/// The ECS world: entities, component stores, and systems.
#[derive(Debug, Default)]
pub struct World {
    entities: EntityManager,
    components: ComponentRegistry,
    systems: SystemManager,
    /// Number of completed `update` calls.
    frame: u64,
}

impl World {
    /// An empty world with no entities, component types, or systems.
    pub fn new() -> Self {
        Self {
            entities: EntityManager::new(),
            components: ComponentRegistry::new(),
            systems: SystemManager::new(),
            frame: 0,
        }
    }

    /// A world whose entity identifiers never exceed `max_id`.
    pub fn with_id_limit(max_id: u64) -> Self {
        Self {
            entities: EntityManager::with_id_limit(max_id),
            ..Self::new()
        }
    }

    // -- Entity lifecycle --

    /// Create a new entity with no components.
    pub fn create_entity(&mut self) -> Result<Entity, EcsError> {
        self.entities.create_entity()
    }

    /// Destroy an entity, dropping every component attached to it.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.entities.destroy_entity(entity)?;
        self.components.entity_destroyed(entity);
        trace!(%entity, "destroyed entity and its components");
        Ok(())
    }

    /// Check if an entity is live.
    pub fn is_entity_valid(&self, entity: Entity) -> bool {
        self.entities.is_entity_valid(entity)
    }

    /// Return the count of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.entity_count()
    }

    /// Live entities in ascending order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.entities()
    }

    // -- Component operations --

    /// Register a component type ahead of first use.
    pub fn register_component<T: Component>(&mut self) -> Result<(), EcsError> {
        self.components.register::<T>()
    }

    /// Attach `value` to a live entity, replacing any previous `T`.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        if !self.entities.is_entity_valid(entity) {
            return Err(EcsError::EntityNotFound(entity));
        }
        self.components.add(entity, value)
    }

    /// Remove a component from an entity. Returns whether one was present.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> bool {
        self.components.remove::<T>(entity)
    }

    /// Check if an entity has a specific component.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.components.has::<T>(entity)
    }

    /// Get a component value from an entity.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.components.get::<T>(entity)
    }

    /// Get a component value from an entity mutably.
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.components.get_mut::<T>(entity)
    }

    /// Direct access to the store for `T`, if registered.
    pub fn store<T: Component>(&self) -> Option<&ComponentStore<T>> {
        self.components.store::<T>()
    }

    /// Read access to every component store.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    // -- Systems --

    /// Register a closure; it runs after every previously registered system.
    pub fn register_system<F>(&mut self, signature: Signature, callback: F) -> Result<SystemId, EcsError>
    where
        F: FnMut(&mut SystemContext<'_>) + Send + 'static,
    {
        self.systems.register_system(signature, callback)
    }

    /// Register a named [`System`] implementation.
    pub fn register_system_with<S: System>(
        &mut self,
        config: SystemConfig,
        system: S,
    ) -> Result<SystemId, EcsError> {
        self.systems.register_system_with(config, system)
    }

    /// The world's system manager.
    pub fn systems(&self) -> &SystemManager {
        &self.systems
    }

    /// The world's system manager, mutably (e.g. to compute stages).
    pub fn systems_mut(&mut self) -> &mut SystemManager {
        &mut self.systems
    }

    /// Number of completed frames.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the world by one frame.
    ///
    /// Runs every system in registration order, then destroys the entities
    /// systems queued for despawn, then advances the frame counter.
    pub fn update(&mut self, delta_time: f64) -> Result<(), EcsError> {
        if !delta_time.is_finite() || delta_time < 0.0 {
            return Err(EcsError::invalid(format!(
                "delta time must be finite and non-negative, got {delta_time}"
            )));
        }

        let tick_id = self.frame + 1;
        let despawns = self
            .systems
            .update(tick_id, delta_time, &self.entities, &mut self.components);

        let mut despawned = 0usize;
        for entity in despawns {
            // Already destroyed or never live: nothing to do.
            if self.destroy_entity(entity).is_ok() {
                despawned += 1;
            }
        }

        self.frame = tick_id;
        debug!(
            frame = self.frame,
            dt = delta_time,
            entities = self.entities.entity_count(),
            despawned,
            "world updated"
        );
        Ok(())
    }

    /// Run system shutdown hooks and drop every entity and component.
    ///
    /// The world stays usable afterwards, empty and without systems.
    pub fn shutdown(&mut self) {
        self.systems.shutdown();
        self.components.clear();
        self.entities.clear();
        info!(frames = self.frame, "world shut down");
    }
}
