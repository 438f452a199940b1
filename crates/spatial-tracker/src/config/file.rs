// crates/spatial-tracker/src/config/file.rs
// File-based configuration from ~/.spatial/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config file structure. Every field is optional so a partial
/// file only overrides what it names.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub tracker: TrackerSection,
    #[serde(default)]
    pub render: RenderSection,
}

/// `[tracker]` section
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct TrackerSection {
    /// Feature toggle
    pub active: Option<bool>,
}

/// `[render]` section
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct RenderSection {
    pub grid_radius: Option<u32>,
    pub show_grid: Option<bool>,
}

impl FileConfig {
    /// Load config from ~/.spatial/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        super::spatial_dir().join("config.toml")
    }
}
