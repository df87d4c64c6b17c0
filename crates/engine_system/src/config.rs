//! System configuration.

use engine_component::Signature;

/// Registration-time description of a system.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Human-readable system name (e.g. `"physics"`), unique per manager.
    pub name: String,
    /// The component requirements of this system.
    pub signature: Signature,
}

impl SystemConfig {
    /// Create a new system config with the given name and signature.
    #[must_use]
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            signature,
        }
    }
}
