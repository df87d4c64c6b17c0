//! Fixed-timestep tick loop.
//!
//! Each tick advances the owned [`World`] by exactly `1 / tick_rate` seconds,
//! then sleeps out whatever is left of the tick's time budget:
//!
//! 1. Run every system in registration order.
//! 2. Apply despawns queued by systems.
//! 3. Advance the tick counter.

use std::time::{Duration, Instant};

use engine_component::EcsError;
use engine_ecs::World;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;

/// Configuration for the tick loop.
#[derive(Debug, Clone, PartialEq)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

impl TickConfig {
    /// Wall-clock length of one tick.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidArgument`] unless `tick_rate` is positive
    /// and `1 / tick_rate` seconds fits in a [`Duration`].
    pub fn tick_duration(&self) -> Result<Duration, EcsError> {
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(EcsError::invalid(format!(
                "tick rate must be positive, got {}",
                self.tick_rate
            )));
        }
        Duration::try_from_secs_f64(1.0 / self.tick_rate).map_err(|err| {
            EcsError::invalid(format!("tick rate {} is out of range: {err}", self.tick_rate))
        })
    }
}

impl From<&EngineConfig> for TickConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            tick_rate: config.tick_rate,
            max_ticks: config.max_ticks,
        }
    }
}

/// The tick loop state.
#[derive(Debug)]
pub struct TickLoop {
    /// Current tick counter.
    tick_id: u64,
    /// Tick configuration.
    config: TickConfig,
    /// The simulated world.
    world: World,
}

impl TickLoop {
    /// Create a new tick loop driving `world`.
    #[must_use]
    pub fn new(config: TickConfig, world: World) -> Self {
        Self {
            tick_id: 0,
            config,
            world,
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Returns a reference to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns a mutable reference to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Consume the loop, handing the world back.
    #[must_use]
    pub fn into_world(self) -> World {
        self.world
    }

    /// Seconds simulated per tick.
    #[must_use]
    pub fn fixed_dt(&self) -> f64 {
        1.0 / self.config.tick_rate
    }

    /// Run one tick of the simulation.
    pub fn tick(&mut self, dt: f64) -> Result<(), EcsError> {
        self.world.update(dt)?;
        self.tick_id += 1;

        debug!(
            tick_id = self.tick_id,
            dt,
            entities = self.world.entity_count(),
            "tick complete"
        );
        Ok(())
    }

    /// Run the tick loop for the configured number of ticks, or indefinitely.
    ///
    /// The loop blocks the calling thread, sleeping between ticks to hold
    /// the configured rate.
    pub fn run(&mut self) -> Result<(), EcsError> {
        let tick_duration = self.config.tick_duration()?;
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        loop {
            let start = Instant::now();

            let dt = tick_duration.as_secs_f64();
            self.tick(dt)?;

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "tick loop complete");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
        Ok(())
    }
}
