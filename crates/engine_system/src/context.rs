//! Per-tick execution context provided to systems.

use std::collections::HashSet;

use engine_component::{Component, ComponentRegistry, EcsError, Entity, EntityManager};

/// Entities queued for destruction during one frame, in request order and
/// without duplicates.
#[derive(Debug, Default)]
pub struct DespawnQueue {
    order: Vec<Entity>,
    queued: HashSet<Entity>,
}

impl DespawnQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `entity`. Returns `false` if it was already queued.
    pub fn push(&mut self, entity: Entity) -> bool {
        if !self.queued.insert(entity) {
            return false;
        }
        self.order.push(entity);
        true
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Entity] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Entity> {
        self.order
    }
}

/// Context provided to a system on each tick.
///
/// Holds the batch of entities matching the system's signature, the frame
/// timing, and access to the world's component stores. Entity destruction
/// requested here is deferred until every system of the frame has run.
pub struct SystemContext<'w> {
    /// The current tick ID.
    pub tick_id: u64,
    /// Delta time since the last tick, in seconds.
    pub dt: f64,
    entities: &'w [Entity],
    live: &'w EntityManager,
    components: &'w mut ComponentRegistry,
    despawns: &'w mut DespawnQueue,
}

impl<'w> SystemContext<'w> {
    /// Create a context for one system invocation.
    #[must_use]
    pub fn new(
        tick_id: u64,
        dt: f64,
        entities: &'w [Entity],
        live: &'w EntityManager,
        components: &'w mut ComponentRegistry,
        despawns: &'w mut DespawnQueue,
    ) -> Self {
        Self {
            tick_id,
            dt,
            entities,
            live,
            components,
            despawns,
        }
    }

    /// Entities matching the system's signature, in ascending order.
    #[must_use]
    pub fn entities(&self) -> &'w [Entity] {
        self.entities
    }

    /// Returns `true` if `entity` is live. Despawns queued this frame still
    /// count as live until the frame ends.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.live.is_entity_valid(entity)
    }

    /// Read access to every component store.
    #[must_use]
    pub fn components(&self) -> &ComponentRegistry {
        &*self.components
    }

    /// Write access to every component store.
    pub fn components_mut(&mut self) -> &mut ComponentRegistry {
        &mut *self.components
    }

    /// Returns `entity`'s `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotFound`] if none is attached.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.components.get::<T>(entity)
    }

    /// Returns `entity`'s `T` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotFound`] if none is attached.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.components.get_mut::<T>(entity)
    }

    /// Queue `entity` for destruction at the end of the frame.
    ///
    /// Queuing the same entity twice, or a dead one, is harmless.
    pub fn despawn(&mut self, entity: Entity) {
        self.despawns.push(entity);
    }

    /// Entities queued for destruction so far this frame.
    #[must_use]
    pub fn pending_despawns(&self) -> &[Entity] {
        self.despawns.as_slice()
    }
}

impl std::fmt::Debug for SystemContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemContext")
            .field("tick_id", &self.tick_id)
            .field("dt", &self.dt)
            .field("entities", &self.entities.len())
            .field("pending_despawns", &self.despawns.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Score(u32);

    impl Component for Score {
        fn type_name() -> &'static str {
            "Score"
        }
    }

    #[test]
    fn test_context_creation() {
        let live = EntityManager::new();
        let mut components = ComponentRegistry::new();
        let mut despawns = DespawnQueue::new();
        let ctx = SystemContext::new(1, 0.016, &[], &live, &mut components, &mut despawns);
        assert_eq!(ctx.tick_id, 1);
        assert!((ctx.dt - 0.016).abs() < f64::EPSILON);
        assert!(ctx.entities().is_empty());
        assert!(ctx.pending_despawns().is_empty());
    }

    #[test]
    fn test_component_access_writes_through() {
        let mut live = EntityManager::new();
        let e = live.create_entity().unwrap();
        let mut components = ComponentRegistry::new();
        components.add(e, Score(1)).unwrap();
        let mut despawns = DespawnQueue::new();

        let batch = [e];
        let mut ctx = SystemContext::new(1, 0.5, &batch, &live, &mut components, &mut despawns);
        assert!(ctx.is_alive(e));
        ctx.get_mut::<Score>(e).unwrap().0 += 4;
        assert_eq!(ctx.get::<Score>(e).unwrap(), &Score(5));
        assert!(ctx.get::<Score>(Entity::from_raw(9)).is_err());

        drop(ctx);
        assert_eq!(components.get::<Score>(e).unwrap(), &Score(5));
    }

    #[test]
    fn test_despawn_is_deduplicated() {
        let live = EntityManager::new();
        let mut components = ComponentRegistry::new();
        let mut despawns = DespawnQueue::new();
        let mut ctx = SystemContext::new(3, 0.1, &[], &live, &mut components, &mut despawns);

        ctx.despawn(Entity::from_raw(2));
        ctx.despawn(Entity::from_raw(2));
        ctx.despawn(Entity::from_raw(4));
        assert_eq!(
            ctx.pending_despawns(),
            &[Entity::from_raw(2), Entity::from_raw(4)]
        );
    }

    #[test]
    fn test_large_despawn_batch_keeps_order() {
        let live = EntityManager::new();
        let mut components = ComponentRegistry::new();
        let mut despawns = DespawnQueue::new();
        let mut ctx = SystemContext::new(1, 0.1, &[], &live, &mut components, &mut despawns);

        for round in 0..2 {
            for id in (1..=10_000u64).rev() {
                ctx.despawn(Entity::from_raw(id));
            }
            assert_eq!(ctx.pending_despawns().len(), 10_000, "round {round}");
        }
        drop(ctx);

        let order = despawns.into_vec();
        assert_eq!(order.first(), Some(&Entity::from_raw(10_000)));
        assert_eq!(order.last(), Some(&Entity::from_raw(1)));
    }
}
