//! Lifecycle-driven indexing through a `Session`
//!
//! All tests run on a paused tokio clock, so sleeping advances time exactly.

mod common;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use atlabel::config::IndexingSettings;
use atlabel::host::{EditorHost, HostError};
use atlabel::session::Session;
use atlabel::{Document, DocumentKey, Position};

use common::{activate, show, workspace_host};

#[tokio::test(start_paused = true)]
async fn test_document_outside_workspace_is_never_indexed() {
    let host = workspace_host();
    let outside = show(&host, "/elsewhere/a.ts", "// @uid\nconst userId = 5;\n@u");
    let session = activate(&host);

    session.on_visible_documents_changed(&[outside.clone()]);
    session.on_document_changed(&outside);
    sleep(Duration::from_secs(5)).await;

    assert!(session.index(&outside.key).is_none());
    assert!(session.store().is_empty());
    assert!(session
        .completions(&outside, "@u", Position::new(2, 2))
        .is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_excluded_directories_are_never_indexed() {
    let host = workspace_host();
    let vendored = show(&host, "/work/node_modules/pkg/index.js", "// @a\nconst a = 1;");
    let settings = show(&host, "/work/.vscode/settings.js", "// @b\nconst b = 1;");
    let session = activate(&host);

    session.on_visible_documents_changed(&[vendored.clone(), settings.clone()]);
    sleep(Duration::from_secs(2)).await;

    assert!(session.store().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_untitled_documents_are_never_indexed() {
    let host = workspace_host();
    let untitled = Document::from_uri("untitled:Untitled-1", None);
    host.open(untitled.clone(), "// @uid\nconst userId = 5;").unwrap();
    host.set_visible(&[untitled.key.clone()]).unwrap();

    let session = activate(&host);
    session.on_visible_documents_changed(&[untitled.clone()]);
    sleep(Duration::from_secs(2)).await;

    assert!(session.index(&untitled.key).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_edit_burst_reindexes_once_with_latest_text() {
    let host = workspace_host();
    let doc = show(&host, "/work/a.ts", "// @old\nconst before = 1;");
    let session = activate(&host);
    assert_eq!(session.index(&doc.key).unwrap().get("old"), Some("before"));

    let start = Instant::now();
    for (offset, text) in [
        (0, "// @one\nconst first = 1;"),
        (10, "// @two\nconst second = 2;"),
        (20, "// @three\nconst third = 3;"),
    ] {
        tokio::time::sleep_until(start + Duration::from_millis(offset)).await;
        host.update_text(&doc.key, text).unwrap();
        session.on_document_changed(&doc);
    }

    // One window after the last edit, not the first
    tokio::time::sleep_until(start + Duration::from_millis(1019)).await;
    assert_eq!(session.index(&doc.key).unwrap().get("old"), Some("before"));

    tokio::time::sleep_until(start + Duration::from_millis(1021)).await;
    let index = session.index(&doc.key).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("three"), Some("third"));
}

#[tokio::test(start_paused = true)]
async fn test_reindex_replaces_whole_index() {
    let host = workspace_host();
    let doc = show(
        &host,
        "/work/a.ts",
        "// @uid\nconst userId = 5;\n// @n\nlet count = 0;",
    );
    let session = activate(&host);
    assert_eq!(session.index(&doc.key).unwrap().len(), 2);

    host.update_text(&doc.key, "// @n\nlet count = 0;").unwrap();
    session.on_document_changed(&doc);
    sleep(Duration::from_millis(1100)).await;

    let index = session.index(&doc.key).unwrap();
    assert!(!index.contains("uid"));
    assert_eq!(index.get("n"), Some("count"));
}

#[tokio::test(start_paused = true)]
async fn test_newly_visible_document_indexed_after_visible_window() {
    let host = workspace_host();
    let session = activate(&host);
    let doc = show(&host, "/work/b.ts", "// @port\nconst port = 80;");

    session.on_visible_documents_changed(&[doc.clone()]);
    sleep(Duration::from_millis(250)).await;
    assert!(session.index(&doc.key).is_none());

    sleep(Duration::from_millis(100)).await;
    assert_eq!(session.index(&doc.key).unwrap().get("port"), Some("port"));
}

/// Host whose every query fails
struct UnavailableHost;

impl EditorHost for UnavailableHost {
    fn visible_documents(&self) -> Result<Vec<Document>, HostError> {
        Err(HostError::Unavailable("disconnected".to_string()))
    }

    fn document_text(&self, _key: &DocumentKey) -> Result<Option<String>, HostError> {
        Err(HostError::Unavailable("disconnected".to_string()))
    }

    fn workspace_roots(&self) -> Result<Vec<PathBuf>, HostError> {
        Err(HostError::Unavailable("disconnected".to_string()))
    }
}

#[tokio::test(start_paused = true)]
async fn test_host_failures_are_contained() {
    let session = Session::activate(Arc::new(UnavailableHost), &IndexingSettings::default())
        .expect("activation survives a failing host");

    let doc = Document::file("/work/a.ts");
    session.on_visible_documents_changed(&[doc.clone()]);
    session.on_document_changed(&doc);
    sleep(Duration::from_secs(2)).await;

    assert!(session.store().is_empty());
    assert!(session.completions(&doc, "@", Position::new(0, 1)).is_empty());
}
