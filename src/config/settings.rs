//! Settings configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Re-indexing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingSettings {
    /// Quiet window after a document becomes visible (milliseconds)
    #[serde(default = "default_visible_debounce_ms")]
    pub visible_debounce_ms: u64,

    /// Quiet window after a document's text changes (milliseconds)
    #[serde(default = "default_edit_debounce_ms")]
    pub edit_debounce_ms: u64,

    /// Documents with a path segment equal to one of these are never indexed
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,
}

impl IndexingSettings {
    pub fn visible_debounce(&self) -> Duration {
        Duration::from_millis(self.visible_debounce_ms)
    }

    pub fn edit_debounce(&self) -> Duration {
        Duration::from_millis(self.edit_debounce_ms)
    }
}

fn default_visible_debounce_ms() -> u64 {
    300
}

fn default_edit_debounce_ms() -> u64 {
    1000
}

fn default_excluded_dirs() -> Vec<String> {
    vec!["node_modules".to_string(), ".vscode".to_string()]
}

impl Default for IndexingSettings {
    fn default() -> Self {
        Self {
            visible_debounce_ms: default_visible_debounce_ms(),
            edit_debounce_ms: default_edit_debounce_ms(),
            excluded_dirs: default_excluded_dirs(),
        }
    }
}

/// HTTP bridge settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// Port on 127.0.0.1
    #[serde(default = "default_port")]
    pub port: u16,

    /// When set (and non-empty), requests must carry it in `X-Atlabel-Token`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

fn default_port() -> u16 {
    9877
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            auth_token: None,
        }
    }
}

/// Workspace scan settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Extra glob patterns (relative to the workspace root) to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}
