//! Engine configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional JSON file, then `ENGINE_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding [`EngineConfig::tick_rate`].
pub const TICK_RATE_ENV: &str = "ENGINE_TICK_RATE";
/// Environment variable overriding [`EngineConfig::max_ticks`].
pub const MAX_TICKS_ENV: &str = "ENGINE_MAX_TICKS";
/// Environment variable overriding [`EngineConfig::max_entities`].
pub const MAX_ENTITIES_ENV: &str = "ENGINE_MAX_ENTITIES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("environment variable {var} has invalid value '{value}'")]
    InvalidOverride { var: &'static str, value: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level engine settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name reported in logs.
    pub app_name: String,
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
    /// Highest entity identifier the world may issue (0 = unlimited).
    pub max_entities: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "engine".to_string(),
            tick_rate: 60.0,
            max_ticks: 0,
            max_entities: 0,
        }
    }
}

impl EngineConfig {
    /// Load defaults, then `path` if given, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply `ENGINE_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(TICK_RATE_ENV) {
            self.tick_rate = parse_override(TICK_RATE_ENV, value)?;
        }
        if let Some(value) = lookup(MAX_TICKS_ENV) {
            self.max_ticks = parse_override(MAX_TICKS_ENV, value)?;
        }
        if let Some(value) = lookup(MAX_ENTITIES_ENV) {
            self.max_entities = parse_override(MAX_ENTITIES_ENV, value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tick_rate must be a positive number, got {}",
                self.tick_rate
            )));
        }
        if Duration::try_from_secs_f64(1.0 / self.tick_rate).is_err() {
            return Err(ConfigError::Invalid(format!(
                "tick_rate {} is too small to schedule",
                self.tick_rate
            )));
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOverride { var, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tick_rate, 60.0);
        assert_eq!(config.max_ticks, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"app_name": "demo", "max_ticks": 10}"#).unwrap();
        assert_eq!(config.app_name, "demo");
        assert_eq!(config.max_ticks, 10);
        assert_eq!(config.tick_rate, 60.0);
    }

    #[test]
    fn test_from_file_and_errors() {
        let dir = std::env::temp_dir();
        let good = dir.join(format!("engine_config_good_{}.json", std::process::id()));
        std::fs::write(&good, r#"{"tick_rate": 30.0, "max_entities": 128}"#).unwrap();
        let config = EngineConfig::from_file(&good).unwrap();
        assert_eq!(config.tick_rate, 30.0);
        assert_eq!(config.max_entities, 128);
        std::fs::remove_file(&good).unwrap();

        let bad = dir.join(format!("engine_config_bad_{}.json", std::process::id()));
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            EngineConfig::from_file(&bad),
            Err(ConfigError::Parse { .. })
        ));
        std::fs::remove_file(&bad).unwrap();

        let missing = dir.join("engine_config_does_not_exist.json");
        assert!(matches!(
            EngineConfig::from_file(&missing),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = EngineConfig::default();
        config
            .apply_overrides(lookup_from(&[
                (TICK_RATE_ENV, "120"),
                (MAX_TICKS_ENV, " 5 "),
                (MAX_ENTITIES_ENV, "64"),
            ]))
            .unwrap();
        assert_eq!(config.tick_rate, 120.0);
        assert_eq!(config.max_ticks, 5);
        assert_eq!(config.max_entities, 64);
    }

    #[test]
    fn test_bad_override_is_reported() {
        let mut config = EngineConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[(MAX_TICKS_ENV, "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverride { var: MAX_TICKS_ENV, .. }
        ));
        assert_eq!(config.max_ticks, 0);
    }

    #[test]
    fn test_validate_rejects_bad_tick_rate() {
        for rate in [0.0, -1.0, 1e-300, f64::NAN, f64::INFINITY] {
            let config = EngineConfig {
                tick_rate: rate,
                ..EngineConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }
}
