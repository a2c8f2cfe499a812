//! Per-document annotation index store
//!
//! One index per document key. Writers replace the whole entry; readers get an
//! `Arc` snapshot, so a reader never observes a half-updated index.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{AnnotationIndex, DocumentKey};

type IndexMap = HashMap<DocumentKey, Arc<AnnotationIndex>>;

/// Shared handle to the document index store (cheap to clone)
#[derive(Debug, Clone, Default)]
pub struct DocumentIndexStore {
    inner: Arc<RwLock<IndexMap>>,
}

impl DocumentIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index for `key`
    pub fn set(&self, key: DocumentKey, index: AnnotationIndex) {
        self.write().insert(key, Arc::new(index));
    }

    /// Current index for `key`
    pub fn get(&self, key: &DocumentKey) -> Option<Arc<AnnotationIndex>> {
        self.read().get(key).cloned()
    }

    pub fn remove(&self, key: &DocumentKey) -> Option<Arc<AnnotationIndex>> {
        self.write().remove(key)
    }

    pub fn contains(&self, key: &DocumentKey) -> bool {
        self.read().contains_key(key)
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn keys(&self) -> Vec<DocumentKey> {
        let mut keys: Vec<_> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
