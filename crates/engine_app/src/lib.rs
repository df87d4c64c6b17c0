//! # engine_app
//!
//! Host for a single [`World`]: configuration loading, world construction,
//! and the fixed-timestep [`TickLoop`].

pub mod config;
pub mod tick;

use engine_component::{EcsError, Entity};
use engine_defaults::{Lifetime, Name, Position, Velocity};
use engine_ecs::World;
use engine_math::{Transform2D, Vec2};
use tracing::info;

pub use config::{ConfigError, EngineConfig};
pub use tick::{TickConfig, TickLoop};

/// Build a world sized by `config` with the default systems installed.
pub fn build_world(config: &EngineConfig) -> Result<World, EcsError> {
    let mut world = if config.max_entities > 0 {
        World::with_id_limit(config.max_entities)
    } else {
        World::new()
    };
    engine_defaults::install(&mut world)?;
    info!(app = %config.app_name, max_entities = config.max_entities, "world ready");
    Ok(world)
}

/// Spawn `count` moving bodies plus one short-lived marker per body.
///
/// Bodies travel outward along evenly spread headings; markers expire after
/// a second of simulated time.
pub fn spawn_demo_entities(world: &mut World, count: usize) -> Result<Vec<Entity>, EcsError> {
    let mut spawned = Vec::with_capacity(count * 2);
    for i in 0..count {
        let heading = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;

        let body = world.create_entity()?;
        world.add_component(body, Name(format!("body-{i}")))?;
        world.add_component(body, Position(Vec2::ZERO))?;
        world.add_component(body, Velocity(Vec2::from_angle(heading) * 2.0))?;
        world.add_component(body, Transform2D::IDENTITY.rotated(heading))?;
        spawned.push(body);

        let marker = world.create_entity()?;
        world.add_component(marker, Position(Vec2::ZERO))?;
        world.add_component(marker, Lifetime::seconds(1.0))?;
        spawned.push(marker);
    }
    Ok(spawned)
}

#[cfg(test)]
mod tests {
    use engine_component::ErrorKind;

    use super::*;

    #[test]
    fn test_build_world_installs_defaults() {
        let world = build_world(&EngineConfig::default()).unwrap();
        assert_eq!(world.systems().system_count(), 3);
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_entity_cap_is_enforced() {
        let config = EngineConfig {
            max_entities: 3,
            ..EngineConfig::default()
        };
        let mut world = build_world(&config).unwrap();
        let err = spawn_demo_entities(&mut world, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(world.entity_count(), 3);
    }

    #[test]
    fn test_demo_markers_expire_and_bodies_move() {
        let config = EngineConfig {
            tick_rate: 4.0,
            max_ticks: 4,
            ..EngineConfig::default()
        };
        let mut world = build_world(&config).unwrap();
        let spawned = spawn_demo_entities(&mut world, 4).unwrap();
        assert_eq!(world.entity_count(), 8);

        let mut tick_loop = TickLoop::new(TickConfig::from(&config), world);
        for _ in 0..config.max_ticks {
            tick_loop.tick(tick_loop.fixed_dt()).unwrap();
        }

        let world = tick_loop.world();
        assert_eq!(world.entity_count(), 4);
        let body = spawned[0];
        let position = world.get_component::<Position>(body).unwrap().0;
        assert!((position - Vec2::new(2.0, 0.0)).length() < 1e-5, "got {position}");
        assert_eq!(
            world.get_component::<Transform2D>(body).unwrap().translation,
            position
        );
        assert!(!world.is_entity_valid(spawned[1]));
    }
}
