//! Runtime configuration of the buoyancy plugin.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GRAVITY, DEFAULT_PROBE_COUNT};
use crate::error::{BuoyancyError, Result};
use crate::physics::ForceModelConfig;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuoyancyConfig {
    pub force_model: ForceModelConfig,
    /// Used when no rapier context provides gravity
    pub gravity: Vec3,
    /// Probes laid around each new hull
    pub probe_count: usize,
}

impl Default for BuoyancyConfig {
    fn default() -> Self {
        Self {
            force_model: ForceModelConfig::default(),
            gravity: DEFAULT_GRAVITY,
            probe_count: DEFAULT_PROBE_COUNT,
        }
    }
}

impl BuoyancyConfig {
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron::de::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BuoyancyError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        log::debug!("Loaded buoyancy config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = BuoyancyConfig::from_ron_str(
            "(probe_count: 12, force_model: (angular_drag: 2.0), gravity: (0.0, -1.62, 0.0))",
        )
        .unwrap();

        assert_eq!(config.probe_count, 12);
        assert_eq!(config.force_model.angular_drag, 2.0);
        assert_eq!(config.force_model.linear_drag, ForceModelConfig::default().linear_drag);
        assert_eq!(config.gravity, Vec3::new(0.0, -1.62, 0.0));
    }

    #[test]
    fn test_round_trip() {
        let config = BuoyancyConfig::default();
        let text = ron::ser::to_string(&config).unwrap();
        assert_eq!(BuoyancyConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = BuoyancyConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, BuoyancyError::ConfigRead { .. }));
    }

    #[test]
    fn test_malformed_config() {
        let err = BuoyancyConfig::from_ron_str("(probe_count: \"many\")").unwrap_err();
        assert!(matches!(err, BuoyancyError::ConfigParse(_)));
    }
}
