//! Indexing controller
//!
//! Bridges editor lifecycle events to the annotation parser and the index
//! store:
//! - activation scans every visible document immediately
//! - a document becoming visible schedules a scan after the visible window
//! - an edit to a visible document schedules a scan after the edit window
//!
//! Scheduling is debounced per document, and a scan always reads the text the
//! host holds when the timer fires.

mod eligibility;

pub use eligibility::{Eligibility, Ineligible};

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, error};

use crate::annotation;
use crate::config::IndexingSettings;
use crate::debounce::Debouncer;
use crate::host::{EditorHost, HostError};
use crate::index::DocumentIndexStore;
use crate::{Document, DocumentKey};

/// Turns lifecycle events into index updates
pub struct IndexingController<H: EditorHost> {
    host: Arc<H>,
    store: DocumentIndexStore,
    eligibility: Eligibility,
    on_visible: Debouncer<DocumentKey, ()>,
    on_edit: Debouncer<DocumentKey, ()>,
}

impl<H: EditorHost> IndexingController<H> {
    pub fn new(
        host: Arc<H>,
        store: DocumentIndexStore,
        settings: &IndexingSettings,
        runtime: Handle,
    ) -> Self {
        let on_visible = Debouncer::new(
            settings.visible_debounce(),
            runtime.clone(),
            reindex_action(Arc::clone(&host), store.clone()),
        );
        let on_edit = Debouncer::new(
            settings.edit_debounce(),
            runtime,
            reindex_action(Arc::clone(&host), store.clone()),
        );

        Self {
            host,
            store,
            eligibility: Eligibility::new(settings.excluded_dirs.clone()),
            on_visible,
            on_edit,
        }
    }

    pub fn store(&self) -> &DocumentIndexStore {
        &self.store
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Scan every visible, eligible document right away
    ///
    /// Returns the number of documents indexed.
    pub fn index_visible_now(&self) -> usize {
        match self.try_index_visible_now() {
            Ok(indexed) => indexed,
            Err(e) => {
                error!("[atlabel:index] Initial indexing failed: {}", e);
                0
            }
        }
    }

    /// The set of visible documents changed
    pub fn on_visible_documents_changed(&self, documents: &[Document]) {
        if let Err(e) = self.try_on_visible_documents_changed(documents) {
            error!("[atlabel:index] Visible documents handler failed: {}", e);
        }
    }

    /// The text of a document changed
    pub fn on_document_changed(&self, document: &Document) {
        if let Err(e) = self.try_on_document_changed(document) {
            error!(
                "[atlabel:index] Change handler failed for {}: {}",
                document.key, e
            );
        }
    }

    /// A document was closed: forget its index and any pending scan
    pub fn on_document_closed(&self, key: &DocumentKey) {
        self.on_visible.cancel(key);
        self.on_edit.cancel(key);
        if self.store.remove(key).is_some() {
            debug!("[atlabel:index] Dropped index for closed document {}", key);
        }
    }

    /// Cancel every pending scan
    pub fn shutdown(&self) {
        self.on_visible.cancel_all();
        self.on_edit.cancel_all();
    }

    /// Number of documents with a scan scheduled
    pub fn pending(&self) -> usize {
        self.on_visible.pending() + self.on_edit.pending()
    }

    fn try_index_visible_now(&self) -> Result<usize, HostError> {
        let roots = self.host.workspace_roots()?;
        let mut indexed = 0;

        for document in self.host.visible_documents()? {
            if !self.eligibility.is_eligible(&document, &roots) {
                continue;
            }
            match reindex(self.host.as_ref(), &self.store, &document.key) {
                Ok(Some(_)) => indexed += 1,
                Ok(None) => {}
                Err(e) => error!(
                    "[atlabel:index] Failed to index {}: {}",
                    document.key, e
                ),
            }
        }

        debug!("[atlabel:index] Indexed {} visible document(s)", indexed);
        Ok(indexed)
    }

    fn try_on_visible_documents_changed(&self, documents: &[Document]) -> Result<(), HostError> {
        let roots = self.host.workspace_roots()?;
        for document in documents {
            if self.eligibility.is_eligible(document, &roots) {
                self.on_visible.trigger(document.key.clone(), ());
            }
        }
        Ok(())
    }

    fn try_on_document_changed(&self, document: &Document) -> Result<(), HostError> {
        if !self.host.is_visible(&document.key)? {
            return Ok(());
        }
        let roots = self.host.workspace_roots()?;
        if self.eligibility.is_eligible(document, &roots) {
            self.on_edit.trigger(document.key.clone(), ());
        }
        Ok(())
    }
}

fn reindex_action<H: EditorHost>(
    host: Arc<H>,
    store: DocumentIndexStore,
) -> impl Fn(DocumentKey, ()) + Send + Sync + 'static {
    move |key: DocumentKey, _: ()| match reindex(host.as_ref(), &store, &key) {
        Ok(Some(labels)) => {
            debug!("[atlabel:index] Re-indexed {} ({} label(s))", key, labels);
        }
        Ok(None) => {
            debug!("[atlabel:index] Skipped {}: document no longer open", key);
        }
        Err(e) => {
            error!("[atlabel:index] Failed to re-index {}: {}", key, e);
        }
    }
}

/// Scan the live text of `key` and replace its store entry
///
/// Returns the number of labels, or `None` if the host no longer has the
/// document.
fn reindex<H: EditorHost + ?Sized>(
    host: &H,
    store: &DocumentIndexStore,
    key: &DocumentKey,
) -> Result<Option<usize>, HostError> {
    let Some(text) = host.document_text(key)? else {
        return Ok(None);
    };

    let index = annotation::scan(&text);
    let labels = index.len();
    store.set(key.clone(), index);
    Ok(Some(labels))
}
