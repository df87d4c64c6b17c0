//! # engine_app — host binary
//!
//! ## Startup Sequence
//!
//! 1. Load [`EngineConfig`] from the JSON file named by the first argument
//!    (optional), then apply `ENGINE_*` environment overrides.
//! 2. Build a world with the default systems and spawn demo entities.
//! 3. Run the fixed-timestep tick loop for `max_ticks` ticks.
//! 4. Shut the world down.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine_app::{EngineConfig, TickConfig, TickLoop, build_world, spawn_demo_entities};

const DEMO_BODIES: usize = 8;

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = EngineConfig::load(config_path.as_deref()).context("loading engine config")?;
    info!(app = %config.app_name, tick_rate = config.tick_rate, "engine starting");

    let mut world = build_world(&config)?;
    let spawned = spawn_demo_entities(&mut world, DEMO_BODIES)?;
    info!(entities = spawned.len(), "spawned demo entities");

    let mut tick_loop = TickLoop::new(TickConfig::from(&config), world);
    tick_loop.run()?;

    let mut world = tick_loop.into_world();
    for (component, count) in world.components().summary() {
        info!(component, count, "final store size");
    }
    world.shutdown();

    info!("engine shut down");
    Ok(())
}
