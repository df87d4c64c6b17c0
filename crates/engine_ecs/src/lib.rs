//! # engine_ecs
//!
//! The [`World`]: one entity manager, one component registry, and one system
//! manager owned together by the caller. Worlds share nothing, so several can
//! live side by side in one process.

pub mod world;

pub use world::World;

pub use engine_component::{
    Component, ComponentTypeId, EcsError, Entity, ErrorKind, Signature,
};
pub use engine_system::{System, SystemConfig, SystemContext, SystemId};
