//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::{Config, CONFIG_DIR, CONFIG_FILE};

impl Config {
    /// Get the global config directory path (~/.atlabel/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
    }

    /// Get the global config file path (~/.atlabel/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join(CONFIG_FILE)
    }

    /// Get the workspace config file path (<dir>/.atlabel/config.toml)
    pub fn workspace_config_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// 1. Exclusive lock prevents concurrent writes from CLI and bridge
    /// 2. Atomic write (temp file + rename) prevents corruption on crash
    /// 3. Parent directory is created if needed
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_locked(path, &content)
    }
}

/// Write `content` to `path` under a sibling `.lock` file
pub fn write_locked(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    // Lock file is separate from the config so the rename doesn't invalidate it
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    // Lock is released when lock_file is dropped
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::workspace_config_path(dir.path());

        let mut config = Config::with_defaults();
        config.indexing.edit_debounce_ms = 1500;
        config.bridge.auth_token = Some("secret".to_string());
        config.save_to_file(&path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_dir_prefers_workspace_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::workspace_config_path(dir.path());
        write_locked(&path, "[bridge]\nport = 4000\n").unwrap();

        let config = Config::from_dir(dir.path()).unwrap();
        assert_eq!(config.bridge.port, 4000);
    }
}
