//! # engine_component
//!
//! The "E" and "C" in ECS — identifiers, component storage, and the
//! signatures systems use to select entities.
//!
//! This crate provides:
//!
//! - [`Entity`] — lightweight `u64` entity identifiers, `0` reserved.
//! - [`EntityManager`] — live-set owner with a recycling free list.
//! - [`Component`] trait and [`ComponentTypeId`].
//! - [`ComponentStore`] — dense typed storage, one per component type.
//! - [`ComponentRegistry`] — the type-erased set of stores of one world.
//! - [`Signature`] — declarative component requirements for systems.
//! - [`EcsError`] — the error type shared by every core operation.

pub mod component;
pub mod entity;
pub mod error;
pub mod registry;
pub mod signature;
pub mod storage;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityManager};
pub use error::{EcsError, ErrorKind};
pub use registry::ComponentRegistry;
pub use signature::Signature;
pub use storage::{ComponentStorage, ComponentStore};
