//! Configuration management for rollcall.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "rollcall";

/// Default roster file name.
const ROSTER_FILE_NAME: &str = "members.csv";

/// Default daily-log directory name.
const LOGS_DIR_NAME: &str = "daily_logs";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROLLCALL_`)
/// 2. TOML config file at `~/.config/rollcall/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Admin gate configuration.
    pub admin: AdminConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the roster and daily logs.
    /// Defaults to `~/.local/share/rollcall`.
    pub data_dir: Option<PathBuf>,
    /// Path to the roster file.
    /// Defaults to `<data_dir>/members.csv`.
    pub roster_path: Option<PathBuf>,
    /// Directory for the per-day log files.
    /// Defaults to `<data_dir>/daily_logs`.
    pub logs_dir: Option<PathBuf>,
}

/// Admin gate configuration.
///
/// The password is compared for exact equality and is explicitly not a
/// security boundary; it gates the desk-side admin views only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared admin password for the roster and log views.
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: "123".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("ROLLCALL_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.admin.password.is_empty() {
            return Err(Error::ConfigValidation {
                message: "admin password must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// The roster file path, resolving defaults if not set.
    #[must_use]
    pub fn roster_path(&self) -> PathBuf {
        self.storage
            .roster_path
            .clone()
            .unwrap_or_else(|| self.data_dir().join(ROSTER_FILE_NAME))
    }

    /// The daily-log directory, resolving defaults if not set.
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.storage
            .logs_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join(LOGS_DIR_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.data_dir.is_none());
        assert!(config.storage.roster_path.is_none());
        assert!(config.storage.logs_dir.is_none());
        assert_eq!(config.admin.password, "123");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_password() {
        let mut config = Config::default();
        config.admin.password = String::new();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("admin password"));
    }

    #[test]
    fn test_roster_path_default() {
        let config = Config::default();
        let path = config.roster_path();

        assert!(path.to_string_lossy().contains("members.csv"));
        assert!(path.to_string_lossy().contains("rollcall"));
    }

    #[test]
    fn test_roster_path_custom() {
        let mut config = Config::default();
        config.storage.roster_path = Some(PathBuf::from("/club/members.csv"));

        assert_eq!(config.roster_path(), PathBuf::from("/club/members.csv"));
    }

    #[test]
    fn test_logs_dir_default() {
        let config = Config::default();
        assert!(config.logs_dir().to_string_lossy().contains("daily_logs"));
    }

    #[test]
    fn test_paths_follow_custom_data_dir() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::from("/srv/club"));

        assert_eq!(config.roster_path(), PathBuf::from("/srv/club/members.csv"));
        assert_eq!(config.logs_dir(), PathBuf::from("/srv/club/daily_logs"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("rollcall"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("roster_path"));
        assert!(json.contains("password"));
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"roster_path": "/tmp/members.csv"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.roster_path, Some(PathBuf::from("/tmp/members.csv")));
        assert!(storage.logs_dir.is_none());
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
