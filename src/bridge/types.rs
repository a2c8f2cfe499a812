//! Request and response bodies of the HTTP bridge

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::host::BufferHost;
use crate::session::Session;
use crate::{CompletionCandidate, Document};

/// Shared state behind the bridge endpoints
#[derive(Clone)]
pub struct BridgeState {
    pub host: Arc<BufferHost>,
    pub session: Arc<Session<BufferHost>>,
}

/// A document as described by the editor extension
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentPayload {
    /// Document URI (`file:///...`, `untitled:...`)
    pub uri: String,
    /// File system path, when the editor knows one
    pub path: Option<PathBuf>,
    /// Full text; omitted for documents the bridge already has
    pub text: Option<String>,
}

impl DocumentPayload {
    pub fn document(&self) -> Document {
        Document::from_uri(&self.uri, self.path.clone())
    }
}

/// POST /workspace
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceRequest {
    pub roots: Vec<PathBuf>,
}

/// POST /documents/visible
#[derive(Debug, Clone, Deserialize)]
pub struct VisibleRequest {
    pub documents: Vec<DocumentPayload>,
}

/// POST /documents/change
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRequest {
    pub uri: String,
    pub text: String,
}

/// POST /documents/close and POST /index
#[derive(Debug, Clone, Deserialize)]
pub struct UriRequest {
    pub uri: String,
}

/// POST /completion
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionRequest {
    pub uri: String,
    pub path: Option<PathBuf>,
    /// Zero-based line of the cursor
    pub line: u32,
    /// Zero-based character column of the cursor
    pub character: u32,
    /// Text of the cursor line; read from the bridge's buffer when absent
    pub line_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionResponse {
    pub items: Vec<CompletionCandidate>,
}
