//! Shared test utilities for session and bridge integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use atlabel::config::IndexingSettings;
use atlabel::host::{BufferHost, EditorHost};
use atlabel::session::Session;
use atlabel::Document;

pub const WORKSPACE: &str = "/work";

/// An in-memory host with a single workspace root at [`WORKSPACE`]
pub fn workspace_host() -> Arc<BufferHost> {
    Arc::new(BufferHost::new(vec![PathBuf::from(WORKSPACE)]))
}

/// Open a file document and add it to the visible set
pub fn show(host: &BufferHost, path: &str, text: &str) -> Document {
    let document = Document::file(path);
    host.open(document.clone(), text)
        .expect("Failed to open document");

    let mut keys: Vec<_> = host
        .visible_documents()
        .expect("Failed to list visible documents")
        .into_iter()
        .map(|doc| doc.key)
        .collect();
    keys.push(document.key.clone());
    host.set_visible(&keys).expect("Failed to set visible documents");

    document
}

/// Activate a session with default debounce windows
pub fn activate(host: &Arc<BufferHost>) -> Session<BufferHost> {
    Session::activate(Arc::clone(host), &IndexingSettings::default())
        .expect("Failed to activate session")
}
