//! CLI command implementations

pub mod complete;
pub mod init;
pub mod scan;
pub mod serve;

use anyhow::Result;
use std::path::Path;

use atlabel::config::Config;

/// Load the config named by `--config`, or the one for the workspace
pub fn load_config(work_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::from_dir(work_dir).unwrap_or_else(|e| {
            tracing::warn!("Falling back to default config: {:#}", e);
            Config::with_defaults()
        })),
    }
}
