//! User configuration and default locations

use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "docvault";

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserConfig {
    /// Whether the welcome dialog has been shown
    #[serde(default)]
    pub welcome_shown: bool,
}

impl UserConfig {
    /// Get the config file path (~/.config/docvault/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    /// Load config from the default location, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            VaultError::ConfigError("Could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            VaultError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        serde_json::from_str(&contents)
            .map_err(|e| VaultError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            VaultError::ConfigError("Could not determine config directory".to_string())
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                VaultError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            VaultError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to write config file: {}", e))
        })
    }
}

/// Platform data directory plus `docvault`, or `./docvault` when the
/// platform reports none
pub fn default_private_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Downloads folder, falling back to the home directory
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(!config.welcome_shown);
    }

    #[test]
    fn test_config_round_trip_on_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.json");

        let config = UserConfig {
            welcome_shown: true,
        };
        config.save_to(&path).unwrap();

        assert_eq!(UserConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_config_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let loaded = UserConfig::load_from(&temp.path().join("config.json")).unwrap();
        assert_eq!(loaded, UserConfig::default());
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        assert!(!UserConfig::load_from(&path).unwrap().welcome_shown);
    }

    #[test]
    fn test_corrupt_config_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            UserConfig::load_from(&path),
            Err(VaultError::ConfigError(_))
        ));
    }

    #[test]
    fn test_default_paths_end_with_app_dir() {
        assert!(default_private_root().ends_with(APP_DIR));
        assert!(!default_export_dir().as_os_str().is_empty());
    }
}
