//! Startup configuration loaded from YAML.

use crate::initializer::NoiseParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Simulation and display settings. Fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board width in cells
    pub width: usize,
    /// Board height in cells
    pub height: usize,
    /// Target ticks per second
    pub fps: u32,
    /// Fixed seed for reproducible boards; random when absent
    pub seed: Option<u64>,
    pub noise: NoiseParams,
    pub window_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 768,
            fps: 60,
            seed: None,
            noise: NoiseParams::default(),
            window_title: "Lifeshade".to_string(),
        }
    }
}

impl Config {
    /// Loads a YAML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "board dimensions {}x{} must both be at least 1",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be at least 1".to_string()));
        }
        self.noise
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo() {
        let config = Config::default();
        assert_eq!((config.width, config.height, config.fps), (1920, 768, 60));
        assert_eq!(config.noise.octaves, 8);
        assert!((config.noise.increment - 0.01).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("width: 320\nseed: 11\nnoise:\n  octaves: 4\n").unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 768);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.noise.octaves, 4);
        assert!((config.noise.increment - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(Config::from_yaml("height: 0"), Err(ConfigError::Invalid(_))));
        assert!(matches!(Config::from_yaml("fps: 0"), Err(ConfigError::Invalid(_))));
        assert!(matches!(
            Config::from_yaml("noise:\n  increment: 0.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(Config::from_yaml("width: [1, 2]"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/lifeshade.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
