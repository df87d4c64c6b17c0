//! The built-in component set.

use engine_component::Component;
use engine_math::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation-space position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

/// Linear velocity in units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// Human-readable label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

impl Component for Name {
    fn type_name() -> &'static str {
        "Name"
    }
}

/// Seconds an entity has left before it is despawned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining: f64,
}

impl Lifetime {
    #[must_use]
    pub fn seconds(remaining: f64) -> Self {
        Self { remaining }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

impl Component for Lifetime {
    fn type_name() -> &'static str {
        "Lifetime"
    }
}
