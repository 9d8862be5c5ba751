//! Application configuration
//!
//! Loaded from an optional JSON file; every missing field takes its default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::{AsianError, AsianResult};
use crate::data::CacheConfig;
use crate::pricing::PricerConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pricer: PricerConfig,
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> AsianResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&json).map_err(|e| {
            AsianError::serialization(format!("Bad config {}: {}", path.display(), e))
        })?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> AsianResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AsianError::serialization(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Execution;
    use tempfile::tempdir;

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("asian.json");

        let mut config = AppConfig::default();
        config.pricer.execution = Execution::Parallel;
        config.cache.max_age_minutes = 60;
        config.to_json_file(&path).unwrap();

        assert_eq!(AppConfig::from_json_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("asian.json");
        fs::write(&path, r#"{"cache": {"enabled": false}}"#).unwrap();

        let config = AppConfig::from_json_file(&path).unwrap();
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.max_age_minutes, 15);
        assert_eq!(config.pricer, PricerConfig::default());
    }

    #[test]
    fn test_bad_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("asian.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            AppConfig::from_json_file(&path),
            Err(AsianError::Serialization(_))
        ));
        assert!(matches!(
            AppConfig::from_json_file(dir.path().join("missing.json")),
            Err(AsianError::IO(_))
        ));
    }
}
