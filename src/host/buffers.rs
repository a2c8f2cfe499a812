//! In-process editor host backed by buffers pushed from the outside
//!
//! Used by the HTTP bridge, where the editor extension mirrors its open
//! documents into atlabel, and by tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use super::{EditorHost, HostError};
use crate::{Document, DocumentKey};

#[derive(Debug, Clone)]
struct Buffer {
    document: Document,
    text: String,
}

#[derive(Debug, Default)]
struct BufferState {
    roots: Vec<PathBuf>,
    buffers: HashMap<DocumentKey, Buffer>,
    /// Visible documents in editor order
    visible: Vec<DocumentKey>,
}

/// Editor host that holds document buffers in memory
#[derive(Debug, Default)]
pub struct BufferHost {
    state: RwLock<BufferState>,
}

impl BufferHost {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            state: RwLock::new(BufferState {
                roots,
                ..BufferState::default()
            }),
        }
    }

    pub fn set_workspace_roots(&self, roots: Vec<PathBuf>) -> Result<(), HostError> {
        self.write()?.roots = roots;
        Ok(())
    }

    /// Open (or reopen) a document with its current text
    pub fn open(&self, document: Document, text: impl Into<String>) -> Result<(), HostError> {
        let key = document.key.clone();
        self.write()?.buffers.insert(
            key,
            Buffer {
                document,
                text: text.into(),
            },
        );
        Ok(())
    }

    /// Replace the text of an open document
    ///
    /// Returns the document, or `None` if it isn't open.
    pub fn update_text(
        &self,
        key: &DocumentKey,
        text: impl Into<String>,
    ) -> Result<Option<Document>, HostError> {
        let mut state = self.write()?;
        Ok(state.buffers.get_mut(key).map(|buffer| {
            buffer.text = text.into();
            buffer.document.clone()
        }))
    }

    /// Replace the set of visible documents; unknown keys are ignored
    pub fn set_visible(&self, keys: &[DocumentKey]) -> Result<Vec<Document>, HostError> {
        let mut state = self.write()?;
        let visible: Vec<DocumentKey> = keys
            .iter()
            .filter(|key| state.buffers.contains_key(*key))
            .cloned()
            .collect();
        let documents = visible
            .iter()
            .filter_map(|key| state.buffers.get(key).map(|b| b.document.clone()))
            .collect();
        state.visible = visible;
        Ok(documents)
    }

    /// Close a document, dropping its buffer
    pub fn close(&self, key: &DocumentKey) -> Result<Option<Document>, HostError> {
        let mut state = self.write()?;
        state.visible.retain(|k| k != key);
        Ok(state.buffers.remove(key).map(|b| b.document))
    }

    pub fn document(&self, key: &DocumentKey) -> Result<Option<Document>, HostError> {
        Ok(self.read()?.buffers.get(key).map(|b| b.document.clone()))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BufferState>, HostError> {
        self.state.read().map_err(|_| HostError::Poisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, BufferState>, HostError> {
        self.state.write().map_err(|_| HostError::Poisoned)
    }
}

impl EditorHost for BufferHost {
    fn visible_documents(&self) -> Result<Vec<Document>, HostError> {
        let state = self.read()?;
        Ok(state
            .visible
            .iter()
            .filter_map(|key| state.buffers.get(key).map(|b| b.document.clone()))
            .collect())
    }

    fn document_text(&self, key: &DocumentKey) -> Result<Option<String>, HostError> {
        Ok(self.read()?.buffers.get(key).map(|b| b.text.clone()))
    }

    fn workspace_roots(&self) -> Result<Vec<PathBuf>, HostError> {
        Ok(self.read()?.roots.clone())
    }

    fn is_visible(&self, key: &DocumentKey) -> Result<bool, HostError> {
        Ok(self.read()?.visible.contains(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_update_close() {
        let host = BufferHost::new(vec![PathBuf::from("/work")]);
        let doc = Document::file("/work/a.ts");

        host.open(doc.clone(), "const a = 1;").unwrap();
        assert_eq!(
            host.document_text(&doc.key).unwrap().as_deref(),
            Some("const a = 1;")
        );

        let updated = host.update_text(&doc.key, "const b = 2;").unwrap();
        assert_eq!(updated, Some(doc.clone()));
        assert_eq!(
            host.document_text(&doc.key).unwrap().as_deref(),
            Some("const b = 2;")
        );

        assert_eq!(host.close(&doc.key).unwrap(), Some(doc.clone()));
        assert!(host.document_text(&doc.key).unwrap().is_none());
        assert!(host.update_text(&doc.key, "x").unwrap().is_none());
    }

    #[test]
    fn test_visible_set() {
        let host = BufferHost::default();
        let a = Document::file("/work/a.ts");
        let b = Document::file("/work/b.ts");
        host.open(a.clone(), "").unwrap();
        host.open(b.clone(), "").unwrap();

        let shown = host
            .set_visible(&[b.key.clone(), DocumentKey::from("file:///missing.ts")])
            .unwrap();
        assert_eq!(shown, vec![b.clone()]);
        assert!(host.is_visible(&b.key).unwrap());
        assert!(!host.is_visible(&a.key).unwrap());

        host.close(&b.key).unwrap();
        assert!(host.visible_documents().unwrap().is_empty());
    }
}
