//! Runner configuration. Loaded from a TOML file at startup; CLI flags override it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use saucer_core::constants::{DEFAULT_VIEWPORT, HERD_SIZE};
use saucer_core::enums::Variant;
use saucer_sim::SimConfig;

/// Default config file, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "saucer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Session and runner settings.
///
/// Every field falls back to its default, so a file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub variant: Variant,
    pub herd_size: usize,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Stop after this many frames. Unbounded when absent (realtime only).
    pub frames: Option<u64>,
    /// Pace frames at the tick rate on a game-loop thread.
    pub realtime: bool,
    /// Let the built-in pilot fly the craft.
    pub autopilot: bool,
    /// Print every snapshot as a JSON line on stdout.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            variant: Variant::Flat,
            herd_size: HERD_SIZE,
            viewport_width: DEFAULT_VIEWPORT.0,
            viewport_height: DEFAULT_VIEWPORT.1,
            frames: None,
            realtime: false,
            autopilot: true,
            json: false,
        }
    }
}

impl AppConfig {
    /// Parse a config from TOML text. `origin` only labels errors.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a config file. Read and parse failures are errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load a config file, using defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::warn!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            variant: self.variant,
            herd_size: self.herd_size,
            viewport: (self.viewport_width, self.viewport_height),
        }
    }
}
