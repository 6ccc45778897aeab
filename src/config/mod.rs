use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::markers::RegionId;

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Marker store file (defaults to the platform data directory)
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Text buffer used for export and import (defaults to the platform data directory)
    #[serde(default)]
    pub buffer_path: Option<PathBuf>,

    /// Regions operated on when none are given on the command line
    #[serde(default)]
    pub active_regions: Vec<RegionId>,

    /// Ask before importing or clearing
    #[serde(default = "default_confirm")]
    pub confirm: bool,
}

fn default_confirm() -> bool {
    true
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            store_path: None,
            buffer_path: None,
            active_regions: Vec::new(),
            confirm: default_confirm(),
        }
    }
}

/// Runtime configuration
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl AppConfig {
    pub fn store_path(&self) -> PathBuf {
        self.data
            .store_path
            .clone()
            .unwrap_or_else(crate::paths::store_file)
    }

    pub fn buffer_path(&self) -> PathBuf {
        self.data
            .buffer_path
            .clone()
            .unwrap_or_else(crate::paths::buffer_file)
    }

    pub fn set_active_regions(&mut self, regions: Vec<RegionId>) {
        if self.data.active_regions != regions {
            self.data.active_regions = regions;
            self.dirty = true;
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of loading config from disk
pub struct LoadConfigResult {
    pub config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Load configuration from the platform config path
pub fn load_config() -> LoadConfigResult {
    load_config_from(crate::paths::config_file())
}

/// Load configuration from disk, falling back to defaults when it is missing or
/// unusable
pub fn load_config_from(config_path: PathBuf) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk if it has unsaved changes
pub fn save_config(config: &mut AppConfig) -> Result<(), ConfigError> {
    if !config.dirty {
        return Ok(());
    }

    write_config(&config.data, &config.config_path)?;
    config.dirty = false;
    info!("Config saved to {:?}", config.config_path);
    Ok(())
}

fn write_config(data: &AppConfigData, path: &Path) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
