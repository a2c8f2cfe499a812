//! Init command implementation

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use atlabel::config::{write_locked, Config};

/// Default configuration content for atlabel init
pub const DEFAULT_CONFIG: &str = r#"# atlabel configuration
# =====================
#
# Label a declaration with a line comment such as `// @uid` and type `@u`
# anywhere in the same file to insert the labeled identifier.

# ============================================================================
# INDEXING - When documents are re-scanned
# ============================================================================
#
#   visible_debounce_ms - Quiet window after a document becomes visible
#   edit_debounce_ms    - Quiet window after a document's text changes
#   excluded_dirs       - Documents under a directory with one of these names
#                         are never indexed

[indexing]
visible_debounce_ms = 300
edit_debounce_ms = 1000
excluded_dirs = ["node_modules", ".vscode"]

# ============================================================================
# BRIDGE - Local HTTP server used by editor extensions (`atlabel serve`)
# ============================================================================
#
# Optional: shared secret for extension requests (sent as `X-Atlabel-Token`).
# Leave empty to disable auth.

[bridge]
port = 9877
auth_token = ""

# ============================================================================
# SCAN - Workspace walk used by `atlabel scan`
# ============================================================================
#
# Glob patterns relative to the workspace root. Gitignored and hidden files
# are always skipped.

[scan]
exclude = []
"#;

/// Write a commented default config
///
/// Targets `--config` when given, otherwise `<workspace>/.atlabel/config.toml`.
pub fn init_command(work_dir: &Path, config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| Config::workspace_config_path(work_dir));

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    write_locked(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_defaults() {
        let mut config = Config::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.bridge.auth_token.as_deref(), Some(""));
        config.bridge.auth_token = None;
        assert_eq!(config, Config::with_defaults());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        init_command(dir.path(), None, false).unwrap();
        assert!(Config::workspace_config_path(dir.path()).exists());

        assert!(init_command(dir.path(), None, false).is_err());
        init_command(dir.path(), None, true).unwrap();
    }
}
