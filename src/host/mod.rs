//! Editor host collaborator surface
//!
//! The indexing core never owns documents. It asks the host which documents are
//! visible, what their text is right now, and where the workspace roots are.

mod buffers;

pub use buffers::BufferHost;

use std::path::PathBuf;

use crate::{Document, DocumentKey};

/// Failure answering a host query
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("Host unavailable: {0}")]
    Unavailable(String),

    #[error("Host state lock poisoned")]
    Poisoned,
}

/// What the core needs from the editor
pub trait EditorHost: Send + Sync + 'static {
    /// Documents currently shown in an editor
    fn visible_documents(&self) -> Result<Vec<Document>, HostError>;

    /// Full current text of a document, `None` once it is closed
    fn document_text(&self, key: &DocumentKey) -> Result<Option<String>, HostError>;

    /// Root directories of the open workspace folders
    fn workspace_roots(&self) -> Result<Vec<PathBuf>, HostError>;

    fn is_visible(&self, key: &DocumentKey) -> Result<bool, HostError> {
        Ok(self.visible_documents()?.iter().any(|doc| &doc.key == key))
    }
}
