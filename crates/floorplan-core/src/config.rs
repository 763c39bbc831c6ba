//! Editor configuration loaded from a JSON file.

use crate::camera::DEFAULT_ZOOM_STEP;
use crate::layout::LayoutSettings;
use crate::storage::DEFAULT_AUTOSAVE_INTERVAL_SECS;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FLOORPLAN_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for an editing host. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Directory holding layout documents. Platform data dir when unset.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    #[serde(default = "EditorConfig::default_autosave_interval")]
    pub autosave_interval_secs: u64,
    /// Wheel zoom factor per notch.
    #[serde(default = "EditorConfig::default_zoom_step")]
    pub zoom_step: f64,
    /// Settings given to newly created layouts.
    #[serde(default)]
    pub default_settings: LayoutSettings,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            autosave_interval_secs: Self::default_autosave_interval(),
            zoom_step: Self::default_zoom_step(),
            default_settings: LayoutSettings::default(),
            log_filter: None,
        }
    }
}

impl EditorConfig {
    fn default_autosave_interval() -> u64 {
        DEFAULT_AUTOSAVE_INTERVAL_SECS
    }

    fn default_zoom_step() -> f64 {
        DEFAULT_ZOOM_STEP
    }

    /// Load configuration from an explicit path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Locate configuration: `FLOORPLAN_CONFIG` first, then
    /// `<config dir>/floorplan/config.json`. Missing files yield defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(PathBuf::from(path));
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Platform location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("floorplan").join("config.json"))
    }

    /// Resolve the document directory.
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir.clone().or_else(|| {
            dirs::data_local_dir()
                .or_else(dirs::home_dir)
                .map(|base| base.join("floorplan").join("layouts"))
        })
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }
}
