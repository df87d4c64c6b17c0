//! System manager — ordered registry and per-frame driver.
//!
//! Systems run in registration order, once per frame, each receiving the
//! full batch of entities whose components satisfy its signature. The order
//! is a contract: code that registers physics before rendering can rely on
//! physics having run first.

use tracing::{debug, info, trace};

use engine_component::{ComponentRegistry, EcsError, Entity, EntityManager, Signature};

use crate::config::SystemConfig;
use crate::context::{DespawnQueue, SystemContext};
use crate::scheduler::{self, Stage};
use crate::system::{FnSystem, System};

/// Handle to a registered system; its position in the run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(pub usize);

/// A registered system with its configuration.
struct RegisteredSystem {
    config: SystemConfig,
    system: Box<dyn System>,
}

/// Ordered registry of systems.
pub struct SystemManager {
    systems: Vec<RegisteredSystem>,
    /// Pre-computed stages (recomputed when the system set changes).
    stages: Vec<Stage>,
    /// Whether the stage cache is dirty and needs recomputation.
    stages_dirty: bool,
}

impl SystemManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            stages: Vec::new(),
            stages_dirty: true,
        }
    }

    /// Register a closure under an automatically generated name.
    ///
    /// The name is the first `system-{n}` not already taken, counting from
    /// the current system count.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidArgument`] if the signature is empty or
    /// lists a component type twice.
    pub fn register_system<F>(&mut self, signature: Signature, callback: F) -> Result<SystemId, EcsError>
    where
        F: FnMut(&mut SystemContext<'_>) + Send + 'static,
    {
        let name = self.next_auto_name();
        self.register_system_with(SystemConfig::new(name, signature), FnSystem(callback))
    }

    /// Register any [`System`] implementation under a named configuration.
    ///
    /// The system's [`System::initialize`] hook runs before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidArgument`] if the name is empty or already
    /// taken, or the signature is malformed.
    pub fn register_system_with<S: System>(
        &mut self,
        config: SystemConfig,
        mut system: S,
    ) -> Result<SystemId, EcsError> {
        if config.name.trim().is_empty() {
            return Err(EcsError::invalid("system name must not be empty"));
        }
        if self.systems.iter().any(|s| s.config.name == config.name) {
            return Err(EcsError::invalid(format!(
                "system '{}' is already registered",
                config.name
            )));
        }
        config.signature.validate()?;

        system.initialize();

        let id = SystemId(self.systems.len());
        debug!(
            system = %config.name,
            index = id.0,
            required = config.signature.len(),
            "registered system"
        );
        self.systems.push(RegisteredSystem {
            config,
            system: Box::new(system),
        });
        self.stages_dirty = true;
        Ok(id)
    }

    fn next_auto_name(&self) -> String {
        (self.systems.len()..)
            .map(|n| format!("system-{n}"))
            .find(|name| !self.systems.iter().any(|s| s.config.name == *name))
            .unwrap_or_default()
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Returns the system names in run order.
    #[must_use]
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.config.name.as_str()).collect()
    }

    /// Returns the signature of a registered system.
    #[must_use]
    pub fn signature(&self, id: SystemId) -> Option<&Signature> {
        self.systems.get(id.0).map(|s| &s.config.signature)
    }

    /// Recompute execution stages from the current system list.
    fn recompute_stages(&mut self) {
        let signatures: Vec<&Signature> = self.systems.iter().map(|s| &s.config.signature).collect();
        self.stages = scheduler::compute_stages(&signatures);
        self.stages_dirty = false;

        debug!(
            stage_count = self.stages.len(),
            system_count = self.systems.len(),
            "recomputed execution stages"
        );
    }

    /// Returns the conflict-free stages, recomputing if necessary.
    #[must_use]
    pub fn stages(&mut self) -> &[Stage] {
        if self.stages_dirty {
            self.recompute_stages();
        }
        &self.stages
    }

    /// Entities satisfying `signature` that are live, ascending.
    #[must_use]
    pub fn matching_entities(
        signature: &Signature,
        entities: &EntityManager,
        components: &ComponentRegistry,
    ) -> Vec<Entity> {
        let mut matched = components.matching(signature);
        matched.retain(|e| entities.is_entity_valid(*e));
        matched
    }

    /// Run every system once, in registration order.
    ///
    /// Each system's batch is computed right before it runs, so it observes
    /// component changes made by systems earlier in the same frame. Returns
    /// the entities queued for destruction during the frame; the caller owns
    /// applying them.
    pub fn update(
        &mut self,
        tick_id: u64,
        dt: f64,
        entities: &EntityManager,
        components: &mut ComponentRegistry,
    ) -> Vec<Entity> {
        let mut despawns = DespawnQueue::new();

        for registered in &mut self.systems {
            let batch = Self::matching_entities(&registered.config.signature, entities, components);
            trace!(
                tick_id,
                system = %registered.config.name,
                matched = batch.len(),
                "running system"
            );

            let mut ctx = SystemContext::new(tick_id, dt, &batch, entities, components, &mut despawns);
            registered.system.run(&mut ctx);
        }

        despawns.into_vec()
    }

    /// Run every shutdown hook in registration order and drop the systems.
    pub fn shutdown(&mut self) {
        for registered in &mut self.systems {
            registered.system.shutdown();
        }
        if !self.systems.is_empty() {
            info!(systems = self.systems.len(), "systems shut down");
        }
        self.systems.clear();
        self.stages.clear();
        self.stages_dirty = true;
    }
}

impl Default for SystemManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SystemManager {
    fn drop(&mut self) {
        if !self.systems.is_empty() {
            self.shutdown();
        }
    }
}

impl std::fmt::Debug for SystemManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemManager")
            .field("systems", &self.system_names())
            .field("stages", &self.stages)
            .finish()
    }
}
