//! # engine_defaults
//!
//! The built-in component set and the systems that operate on it.
//!
//! [`install`] registers everything on a [`World`] in a fixed order:
//! movement first, then lifetimes, then transform sync, so rendered
//! transforms always reflect the positions integrated this frame.

pub mod components;
pub mod systems;

use engine_component::EcsError;
use engine_ecs::World;
use engine_math::Transform2D;
use tracing::info;

pub use components::{Lifetime, Name, Position, Velocity};
pub use systems::{LifetimeSystem, Movement, TransformSync};

/// Register the built-in components and systems on `world`.
///
/// # Errors
///
/// Fails if any built-in system name is already taken on `world`, or if a
/// component type identifier collides with one the caller registered.
pub fn install(world: &mut World) -> Result<(), EcsError> {
    world.register_component::<Position>()?;
    world.register_component::<Velocity>()?;
    world.register_component::<Name>()?;
    world.register_component::<Lifetime>()?;
    world.register_component::<Transform2D>()?;

    world.register_system_with(Movement::config(), Movement)?;
    world.register_system_with(LifetimeSystem::config(), LifetimeSystem::default())?;
    world.register_system_with(TransformSync::config(), TransformSync)?;

    info!(
        systems = world.systems().system_count(),
        components = world.components().type_count(),
        "installed default systems"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use engine_component::ErrorKind;
    use engine_math::Vec2;

    use super::*;

    #[test]
    fn test_install_registers_in_order() {
        let mut world = World::new();
        install(&mut world).unwrap();
        assert_eq!(
            world.systems().system_names(),
            vec!["movement", "lifetime", "transform_sync"]
        );
        assert_eq!(world.components().type_count(), 5);
    }

    #[test]
    fn test_install_twice_is_rejected() {
        let mut world = World::new();
        install(&mut world).unwrap();
        let err = install(&mut world).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_frame_moves_syncs_and_expires() {
        let mut world = World::new();
        install(&mut world).unwrap();

        let ship = world.create_entity().unwrap();
        world.add_component(ship, Name("ship".into())).unwrap();
        world.add_component(ship, Position(Vec2::ZERO)).unwrap();
        world.add_component(ship, Velocity(Vec2::new(2.0, 0.0))).unwrap();
        world.add_component(ship, Transform2D::IDENTITY).unwrap();

        let spark = world.create_entity().unwrap();
        world.add_component(spark, Position(Vec2::ONE)).unwrap();
        world.add_component(spark, Lifetime::seconds(0.75)).unwrap();

        world.update(0.5).unwrap();
        assert_eq!(world.get_component::<Position>(ship).unwrap().0, Vec2::new(1.0, 0.0));
        assert_eq!(
            world.get_component::<Transform2D>(ship).unwrap().translation,
            Vec2::new(1.0, 0.0)
        );
        assert!(world.is_entity_valid(spark));

        world.update(0.5).unwrap();
        assert!(!world.is_entity_valid(spark));
        assert!(!world.has_component::<Position>(spark));
        assert_eq!(world.get_component::<Name>(ship).unwrap().0, "ship");
        assert_eq!(world.entity_count(), 1);
    }
}
