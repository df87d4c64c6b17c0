//! Built-in systems.
//!
//! Each one is a plain struct implementing [`System`], registered under a
//! fixed name by [`crate::install`].

use engine_component::Signature;
use engine_math::Transform2D;
use engine_system::{System, SystemConfig, SystemContext};
use tracing::{debug, trace};

use crate::components::{Lifetime, Position, Velocity};

/// Integrates `Velocity` into `Position`: `p += v * dt`.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    pub const NAME: &'static str = "movement";

    #[must_use]
    pub fn config() -> SystemConfig {
        SystemConfig::new(Self::NAME, Signature::new().read::<Velocity>().write::<Position>())
    }
}

impl System for Movement {
    fn run(&mut self, ctx: &mut SystemContext<'_>) {
        let dt = ctx.dt as f32;
        for &entity in ctx.entities() {
            let Ok(velocity) = ctx.get::<Velocity>(entity).map(|v| v.0) else {
                continue;
            };
            if let Ok(position) = ctx.get_mut::<Position>(entity) {
                position.0 += velocity * dt;
            }
        }
    }
}

/// Counts `Lifetime` down and despawns entities whose time has run out.
///
/// Despawns go through the frame's deferred queue, so later systems still
/// see expiring entities this frame.
#[derive(Debug, Default)]
pub struct LifetimeSystem {
    expired_total: u64,
}

impl LifetimeSystem {
    pub const NAME: &'static str = "lifetime";

    #[must_use]
    pub fn config() -> SystemConfig {
        SystemConfig::new(Self::NAME, Signature::new().write::<Lifetime>())
    }
}

impl System for LifetimeSystem {
    fn run(&mut self, ctx: &mut SystemContext<'_>) {
        let dt = ctx.dt;
        for &entity in ctx.entities() {
            let expired = match ctx.get_mut::<Lifetime>(entity) {
                Ok(lifetime) => {
                    lifetime.remaining -= dt;
                    lifetime.is_expired()
                }
                Err(_) => false,
            };
            if expired {
                trace!(%entity, tick_id = ctx.tick_id, "lifetime expired");
                ctx.despawn(entity);
                self.expired_total += 1;
            }
        }
    }

    fn shutdown(&mut self) {
        debug!(expired = self.expired_total, "lifetime system stopped");
    }
}

/// Copies `Position` into the render-facing `Transform2D`.
#[derive(Debug, Default)]
pub struct TransformSync;

impl TransformSync {
    pub const NAME: &'static str = "transform_sync";

    #[must_use]
    pub fn config() -> SystemConfig {
        SystemConfig::new(Self::NAME, Signature::new().read::<Position>().write::<Transform2D>())
    }
}

impl System for TransformSync {
    fn run(&mut self, ctx: &mut SystemContext<'_>) {
        for &entity in ctx.entities() {
            let Ok(position) = ctx.get::<Position>(entity).map(|p| p.0) else {
                continue;
            };
            if let Ok(transform) = ctx.get_mut::<Transform2D>(entity) {
                transform.translation = position;
            }
        }
    }
}
