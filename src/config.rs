// File: src/config.rs
//! Settings for the interactive CLI, stored as TOML.
//!
//! The length bounds here are a presentation policy. The library itself
//! accepts any request length.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "./hwrand.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    /// Smallest length the menu accepts.
    pub min_length: usize,
    /// Largest length the menu accepts.
    pub max_length: usize,
    pub bytes_per_line: usize,
    pub bytes_per_group: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            min_length: 1,
            max_length: 10_000,
            bytes_per_line: 16,
            bytes_per_group: 8,
        }
    }
}

impl Config {
    /// Loads `./hwrand.toml`, or the defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads the configuration from `path`. A missing file yields the
    /// defaults; a malformed one is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::Invalid("min_length must be at least 1".into()));
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::Invalid(format!(
                "min_length ({}) exceeds max_length ({})",
                self.min_length, self.max_length
            )));
        }
        if self.bytes_per_line == 0 || self.bytes_per_group == 0 {
            return Err(ConfigError::Invalid(
                "bytes_per_line and bytes_per_group must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Returns whether the menu should accept `length`.
    pub fn accepts_length(&self, length: usize) -> bool {
        (self.min_length..=self.max_length).contains(&length)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hwrand-config-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.min_length, 1);
        assert_eq!(config.max_length, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_missing_file_uses_default() {
        let config = Config::load_from(temp_path("does-not-exist.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let path = temp_path("save_and_load.toml");
        let config = Config {
            log_level: "debug".to_string(),
            max_length: 64,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_config_partial_file_fills_defaults() {
        let path = temp_path("partial.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "max_length = 32\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.max_length, 32);
        assert_eq!(loaded.bytes_per_line, 16);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_config_rejects_malformed_file() {
        let path = temp_path("malformed.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "max_length = \"lots\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_config_validation() {
        let inverted = Config {
            min_length: 10,
            max_length: 5,
            ..Config::default()
        };
        assert!(matches!(inverted.validate(), Err(ConfigError::Invalid(_))));

        let zero_min = Config {
            min_length: 0,
            ..Config::default()
        };
        assert!(zero_min.validate().is_err());

        let no_groups = Config {
            bytes_per_group: 0,
            ..Config::default()
        };
        assert!(no_groups.validate().is_err());
    }

    #[test]
    fn test_accepts_length() {
        let config = Config::default();
        assert!(!config.accepts_length(0));
        assert!(config.accepts_length(1));
        assert!(config.accepts_length(10_000));
        assert!(!config.accepts_length(10_001));
    }
}
