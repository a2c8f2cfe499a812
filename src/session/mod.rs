//! Activation and teardown of the annotation completion core
//!
//! A [`Session`] owns the index store for one editor connection. It is created
//! on activation, receives the editor's lifecycle events and completion
//! requests, and is torn down on deactivation. Nothing is persisted.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::info;

use crate::completion::CompletionProvider;
use crate::config::IndexingSettings;
use crate::host::EditorHost;
use crate::index::DocumentIndexStore;
use crate::indexing::IndexingController;
use crate::{AnnotationIndex, CompletionCandidate, Document, DocumentKey, Position, Result};

pub struct Session<H: EditorHost> {
    controller: IndexingController<H>,
    completions: CompletionProvider,
}

impl<H: EditorHost> Session<H> {
    /// Activate on the current tokio runtime and index visible documents
    pub fn activate(host: Arc<H>, settings: &IndexingSettings) -> Result<Self> {
        let runtime = Handle::try_current()?;
        Ok(Self::activate_on(host, settings, runtime))
    }

    /// Activate with debounce timers running on `runtime`
    pub fn activate_on(host: Arc<H>, settings: &IndexingSettings, runtime: Handle) -> Self {
        let store = DocumentIndexStore::new();
        let controller = IndexingController::new(host, store.clone(), settings, runtime);
        let indexed = controller.index_visible_now();

        info!(
            "[atlabel:session] Activated ({} document(s) indexed, debounce visible={}ms edit={}ms)",
            indexed, settings.visible_debounce_ms, settings.edit_debounce_ms
        );

        Self {
            controller,
            completions: CompletionProvider::new(store),
        }
    }

    pub fn on_visible_documents_changed(&self, documents: &[Document]) {
        self.controller.on_visible_documents_changed(documents);
    }

    pub fn on_document_changed(&self, document: &Document) {
        self.controller.on_document_changed(document);
    }

    pub fn on_document_closed(&self, key: &DocumentKey) {
        self.controller.on_document_closed(key);
    }

    /// Completion candidates for a cursor on `line_text`
    pub fn completions(
        &self,
        document: &Document,
        line_text: &str,
        position: Position,
    ) -> Vec<CompletionCandidate> {
        self.completions.provide(document, line_text, position)
    }

    /// Completion candidates for a cursor in a full document text
    pub fn completions_in_text(
        &self,
        document: &Document,
        text: &str,
        position: Position,
    ) -> Vec<CompletionCandidate> {
        self.completions.provide_in_text(document, text, position)
    }

    /// Current index of a document
    pub fn index(&self, key: &DocumentKey) -> Option<Arc<AnnotationIndex>> {
        self.controller.store().get(key)
    }

    pub fn store(&self) -> &DocumentIndexStore {
        self.controller.store()
    }

    pub fn host(&self) -> &Arc<H> {
        self.controller.host()
    }

    /// Cancel pending scans and drop every index
    pub fn deactivate(&self) {
        self.controller.shutdown();
        self.controller.store().clear();
        info!("[atlabel:session] Deactivated");
    }
}
