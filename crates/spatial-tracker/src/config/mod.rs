// crates/spatial-tracker/src/config/mod.rs
// Layered configuration: defaults < ~/.spatial/config.toml < SPATIAL_* env

pub mod env;
pub mod file;

pub use env::EnvConfig;
pub use file::FileConfig;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;

/// Default radar grid radius in cells
pub const DEFAULT_GRID_RADIUS: u32 = 5;

/// Largest grid radius accepted; larger values are clamped
pub const MAX_GRID_RADIUS: u32 = 20;

/// Get the spatial data directory (~/.spatial)
pub fn spatial_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| {
            tracing::warn!("HOME directory not set, using current directory for spatial config");
            PathBuf::from(".")
        })
        .join(".spatial")
}

/// Resolve the subscriber level from SPATIAL_LOG_LEVEL, falling back to
/// `default` when unset or not a known level
pub fn log_level(setting: Option<&str>, default: Level) -> Level {
    setting
        .and_then(|l| l.parse::<Level>().ok())
        .unwrap_or(default)
}

/// Options for the read-only view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub grid_radius: u32,
    pub show_grid: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            grid_radius: DEFAULT_GRID_RADIUS,
            show_grid: true,
        }
    }
}

/// Per-invocation config supplied by the host. Overrides everything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    pub active: Option<bool>,
}

/// Resolved tracker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Feature toggle gating every tracker behavior
    pub active: bool,
    pub render: RenderOptions,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            active: true,
            render: RenderOptions::default(),
        }
    }
}

impl TrackerConfig {
    /// Load defaults, then the config file, then the environment
    pub fn load() -> Self {
        Self::resolve(FileConfig::load(), EnvConfig::from_env())
    }

    /// Merge the layers; later layers win
    pub fn resolve(file: FileConfig, env: EnvConfig) -> Self {
        let defaults = Self::default();
        let grid_radius = env
            .grid_radius
            .or(file.render.grid_radius)
            .unwrap_or(defaults.render.grid_radius)
            .min(MAX_GRID_RADIUS);

        Self {
            active: env.active.or(file.tracker.active).unwrap_or(defaults.active),
            render: RenderOptions {
                grid_radius,
                show_grid: file.render.show_grid.unwrap_or(defaults.render.show_grid),
            },
        }
    }

    /// Apply the host's per-invocation overrides
    pub fn with_host(mut self, host: Option<HostConfig>) -> Self {
        if let Some(active) = host.and_then(|h| h.active) {
            self.active = active;
        }
        self
    }
}
