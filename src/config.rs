// Fri Jan 16 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Limits applied while converting script values into variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub max_depth: usize,
    pub detect_cycles: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            detect_cycles: true,
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ValidationError("max_depth must be greater than 0".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub bridge: BridgeConfig,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bridge(mut self, bridge: BridgeConfig) -> Self {
        self.bridge = bridge;
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "json" {
            return Err(ConfigError::UnsupportedFormat(ext.to_string()));
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: SessionConfig = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bridge.validate()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("jsvb-config-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.bridge.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.bridge.detect_cycles);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = SessionConfig::new().with_bridge(BridgeConfig::new().with_max_depth(0));
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_partial_json() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{"bridge": {"max_depth": 8}}"#).unwrap();
        let config = SessionConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.bridge.max_depth, 8);
        assert!(config.bridge.detect_cycles);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            SessionConfig::load(temp_path("absent.json")),
            Err(ConfigError::NotFound(_))
        ));

        let yaml = temp_path("config.yaml");
        fs::write(&yaml, "bridge: {}").unwrap();
        let result = SessionConfig::load(&yaml);
        fs::remove_file(&yaml).ok();
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        let broken = temp_path("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let result = SessionConfig::load(&broken);
        fs::remove_file(&broken).ok();
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
