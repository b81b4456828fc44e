use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::application::LayoutConfig;
use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_STORAGE_KEY};

/// TOML configuration for notegrid
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub autosize: AutosizeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    /// Empty means the platform data directory
    #[serde(default = "default_dir")]
    pub dir: String,
    #[serde(default = "default_key")]
    pub key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AutosizeConfig {
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,
    /// 0 = unbounded
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

// Default value functions
fn default_dir() -> String { String::new() }
fn default_key() -> String { DEFAULT_STORAGE_KEY.to_string() }
fn default_min_rows() -> usize { 1 }
fn default_max_rows() -> usize { 0 }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            key: default_key(),
        }
    }
}

impl Default for AutosizeConfig {
    fn default() -> Self {
        Self {
            min_rows: default_min_rows(),
            max_rows: default_max_rows(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Explicit path if given, else the user config file if present, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path)
                .with_context(|| format!("Config file {}", path.display()));
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading user config");
                Self::load(&path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Directory holding the note store.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if !self.storage.dir.is_empty() {
            return Ok(PathBuf::from(&self.storage.dir));
        }
        let data = dirs::data_dir().context("Could not find data directory")?;
        Ok(data.join(APP_DIR_NAME))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_config_when_saving_then_writes_toml_sections() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        Config::default().save(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[storage]"));
        assert!(content.contains("[layout]"));
        assert!(content.contains("[autosize]"));
    }

    #[test]
    fn given_toml_file_when_loading_then_reads_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("load_test.toml");

        let toml_content = r#"
[storage]
dir = "/tmp/boards"
key = "work"

[layout]
item_selector = ".card"
column_width = ".sizer"
percent_position = false
columns = 4

[autosize]
min_rows = 2
max_rows = 12
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.storage.key, "work");
        assert_eq!(config.storage_dir().unwrap(), PathBuf::from("/tmp/boards"));
        assert_eq!(config.layout.item_selector, ".card");
        assert_eq!(config.layout.column_width, ".sizer");
        assert!(!config.layout.percent_position);
        assert_eq!(config.layout.columns, 4);
        assert_eq!(config.autosize.min_rows, 2);
        assert_eq!(config.autosize.max_rows, 12);
    }

    #[test]
    fn given_partial_toml_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[layout]\ncolumns = 2\n").unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.layout.columns, 2);
        assert_eq!(config.layout.item_selector, ".col");
        assert!(config.layout.percent_position);
        assert_eq!(config.storage.key, "notes");
        assert_eq!(config.autosize, AutosizeConfig::default());
    }

    #[test]
    fn given_missing_explicit_path_when_resolving_then_returns_error() {
        let result = Config::resolve(Some(Path::new("/nonexistent/path/config.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn given_round_trip_when_saving_and_loading_then_preserves_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("roundtrip.toml");
        let original = Config {
            storage: StorageConfig {
                dir: "/data/notes".to_string(),
                ..Default::default()
            },
            layout: LayoutConfig {
                columns: 5,
                ..Default::default()
            },
            autosize: AutosizeConfig {
                min_rows: 3,
                max_rows: 9,
            },
        };

        original.save(&config_path).unwrap();

        assert_eq!(Config::load(&config_path).unwrap(), original);
    }
}
