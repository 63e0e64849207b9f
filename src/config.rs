//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Default values for commands
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .choreboard.yml
        let local_config = PathBuf::from(".choreboard.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/choreboard/choreboard.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("choreboard").join("choreboard.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the database and logs
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Path to the SQLite database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("choreboard.db")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        // XDG data directory (~/.local/share/choreboard on Linux)
        let data_dir = dirs::data_dir()
            .map(|d| d.join("choreboard"))
            .unwrap_or_else(|| PathBuf::from(".choreboard"));
        Self { data_dir }
    }
}

/// Default values for commands
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Username commands run as when --as is not given
    pub user: Option<String>,

    /// Points given to tasks created without an explicit value
    pub points: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.defaults.user.is_none());
        assert_eq!(config.defaults.points, 0);
        assert!(config.storage.db_path().ends_with("choreboard.db"));
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
storage:
  data-dir: /tmp/choreboard-test

defaults:
  user: emma
  points: 10
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/choreboard-test"));
        assert_eq!(config.defaults.user.as_deref(), Some("emma"));
        assert_eq!(config.defaults.points, 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
defaults:
  user: sam
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.defaults.user.as_deref(), Some("sam"));
        assert_eq!(config.defaults.points, 0);
        assert!(config.storage.db_path().ends_with("choreboard.db"));
    }
}
