//! # engine_system
//!
//! System registry and per-frame execution for the ECS core.
//!
//! A system is a routine paired with a [`Signature`](engine_component::Signature):
//! the component types it reads and writes. Every frame the
//! [`SystemManager`] runs each system once, in registration order, with the
//! batch of entities that have all of the required components.
//!
//! ## Usage
//!
//! ```rust
//! use engine_component::{Component, ComponentRegistry, EntityManager, Signature};
//! use engine_system::SystemManager;
//!
//! struct Health(f32);
//! impl Component for Health {
//!     fn type_name() -> &'static str {
//!         "Health"
//!     }
//! }
//!
//! let mut entities = EntityManager::new();
//! let mut components = ComponentRegistry::new();
//! let e = entities.create_entity().unwrap();
//! components.add(e, Health(10.0)).unwrap();
//!
//! let mut systems = SystemManager::new();
//! systems
//!     .register_system(Signature::new().write::<Health>(), |ctx| {
//!         for &e in ctx.entities() {
//!             ctx.get_mut::<Health>(e).unwrap().0 -= 1.0;
//!         }
//!     })
//!     .unwrap();
//!
//! systems.update(1, 0.016, &entities, &mut components);
//! assert_eq!(components.get::<Health>(e).unwrap().0, 9.0);
//! ```

pub mod config;
pub mod context;
pub mod manager;
pub mod scheduler;
pub mod system;

pub use config::SystemConfig;
pub use context::{DespawnQueue, SystemContext};
pub use manager::{SystemId, SystemManager};
pub use scheduler::{Stage, compute_stages};
pub use system::{FnSystem, System};
