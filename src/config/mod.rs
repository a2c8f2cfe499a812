//! Configuration loading and management

mod io;
mod settings;

pub use io::write_locked;
pub use settings::{BridgeSettings, IndexingSettings, ScanSettings};

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory holding the per-workspace and global config files
pub const CONFIG_DIR: &str = ".atlabel";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Re-indexing behavior
    #[serde(default)]
    pub indexing: IndexingSettings,

    /// Local HTTP bridge for editor extensions
    #[serde(default)]
    pub bridge: BridgeSettings,

    /// Workspace walk used by `atlabel scan`
    #[serde(default)]
    pub scan: ScanSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration for a workspace directory
    /// Looks for: <dir>/.atlabel/config.toml, then ~/.atlabel/config.toml
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let local_path = Self::workspace_config_path(dir);
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        Ok(Self::with_defaults())
    }

    /// Create a config with defaults
    pub fn with_defaults() -> Self {
        Self::default()
    }
}
