//! # engine_math
//!
//! Math types for the ECS engine. Re-exports [`glam`] for linear algebra and
//! defines engine-specific spatial types that implement
//! [`Component`](engine_component::Component).

pub mod transform;

// Re-export glam types for convenience.
pub use glam::{Affine2, Mat3, Vec2, Vec3};

pub use transform::Transform2D;
