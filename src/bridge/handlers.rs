//! Bridge endpoint handlers
//!
//! Handlers turn a JSON body into calls on the buffer host and the session and
//! return the reply. They never touch the socket.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::types::{
    BridgeState, ChangeRequest, CompletionRequest, CompletionResponse, UriRequest,
    VisibleRequest, WorkspaceRequest,
};
use crate::completion::line_at;
use crate::host::{EditorHost, HostError};
use crate::{Document, DocumentKey, Position};

/// Status code and JSON body of a reply
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn error(status: u16, code: &str) -> Self {
        Self {
            status,
            body: json!({ "error": code }),
        }
    }
}

impl From<HostError> for Reply {
    fn from(e: HostError) -> Self {
        error!("[atlabel:http] Host error: {}", e);
        Reply::error(500, "host_error")
    }
}

/// Route a request to its handler
pub fn dispatch(state: &BridgeState, method: &str, path: &str, body: &str) -> Reply {
    let result = match (method, path) {
        ("GET", "/ping") => Ok(Reply::ok(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        }))),
        ("POST", "/workspace") => parse(body).and_then(|req| handle_workspace(state, req)),
        ("POST", "/documents/visible") => parse(body).and_then(|req| handle_visible(state, req)),
        ("POST", "/documents/change") => parse(body).and_then(|req| handle_change(state, req)),
        ("POST", "/documents/close") => parse(body).and_then(|req| handle_close(state, req)),
        ("POST", "/completion") => parse(body).and_then(|req| handle_completion(state, req)),
        ("POST", "/index") => parse(body).and_then(|req| handle_index(state, req)),
        _ => Err(Reply::error(404, "not_found")),
    };

    result.unwrap_or_else(|reply| reply)
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Reply> {
    serde_json::from_str(body).map_err(|e| {
        error!("[atlabel:http] Invalid JSON: {}", e);
        Reply {
            status: 400,
            body: json!({ "error": "bad_request", "detail": e.to_string() }),
        }
    })
}

fn handle_workspace(state: &BridgeState, req: WorkspaceRequest) -> Result<Reply, Reply> {
    info!("[atlabel:http] Workspace roots: {:?}", req.roots);
    state.host.set_workspace_roots(req.roots)?;
    Ok(Reply::ok(json!({ "status": "ok" })))
}

fn handle_visible(state: &BridgeState, req: VisibleRequest) -> Result<Reply, Reply> {
    let mut keys = Vec::with_capacity(req.documents.len());

    for payload in &req.documents {
        let document = payload.document();
        if let Some(text) = &payload.text {
            state.host.open(document.clone(), text.as_str())?;
        }
        keys.push(document.key);
    }

    let visible = state.host.set_visible(&keys)?;
    debug!(
        "[atlabel:http] Visible: {} of {} document(s) known",
        visible.len(),
        keys.len()
    );
    state.session.on_visible_documents_changed(&visible);

    Ok(Reply::ok(json!({ "status": "ok", "visible": visible.len() })))
}

fn handle_change(state: &BridgeState, req: ChangeRequest) -> Result<Reply, Reply> {
    let key = DocumentKey::new(req.uri);
    match state.host.update_text(&key, req.text)? {
        Some(document) => {
            state.session.on_document_changed(&document);
            Ok(Reply::ok(json!({ "status": "ok" })))
        }
        None => Err(Reply::error(404, "unknown_document")),
    }
}

fn handle_close(state: &BridgeState, req: UriRequest) -> Result<Reply, Reply> {
    let key = DocumentKey::new(req.uri);
    state.host.close(&key)?;
    state.session.on_document_closed(&key);
    Ok(Reply::ok(json!({ "status": "ok" })))
}

fn handle_completion(state: &BridgeState, req: CompletionRequest) -> Result<Reply, Reply> {
    let key = DocumentKey::new(req.uri.as_str());
    let document = state
        .host
        .document(&key)?
        .unwrap_or_else(|| Document::from_uri(&req.uri, req.path.clone()));
    let position = Position::new(req.line, req.character);

    let line_text = match req.line_text {
        Some(line) => Some(line),
        None => state
            .host
            .document_text(&key)?
            .and_then(|text| line_at(&text, req.line).map(str::to_string)),
    };

    let items = match line_text {
        Some(line) => state.session.completions(&document, &line, position),
        None => Vec::new(),
    };

    let body = serde_json::to_value(CompletionResponse { items })
        .map_err(|_| Reply::error(500, "serialize"))?;
    Ok(Reply::ok(body))
}

fn handle_index(state: &BridgeState, req: UriRequest) -> Result<Reply, Reply> {
    let key = DocumentKey::new(req.uri);
    let body = match state.session.index(&key) {
        Some(index) => {
            serde_json::to_value(index.as_ref()).map_err(|_| Reply::error(500, "serialize"))?
        }
        None => json!({}),
    };
    Ok(Reply::ok(body))
}
