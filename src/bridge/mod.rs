//! Local HTTP bridge for editor extensions
//!
//! Listens on 127.0.0.1 and forwards the editor's document lifecycle events
//! and completion requests to a [`Session`](crate::session::Session):
//! - GET  /ping
//! - POST /workspace          - workspace folder paths
//! - POST /documents/visible  - the set of visible documents (with text)
//! - POST /documents/change   - new full text of an open document
//! - POST /documents/close    - a closed document
//! - POST /completion         - candidates for a cursor position
//! - POST /index              - current annotation index of a document

mod handlers;
mod types;

pub use handlers::{dispatch, Reply};
pub use types::*;

use anyhow::{anyhow, Result};
use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use tiny_http::{Response, Server};
use tracing::{error, info};

use crate::config::BridgeSettings;

const AUTH_HEADER: &str = "X-Atlabel-Token";
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024; // 2 MiB

/// A running bridge; requests are served on a background thread
pub struct BridgeServer {
    server: Arc<Server>,
    addr: SocketAddr,
    handle: Option<thread::JoinHandle<()>>,
}

impl BridgeServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting requests and wait for the server thread
    pub fn shutdown(mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for BridgeServer {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

/// Bind the bridge and serve it on a background thread
pub fn start_bridge_server(state: BridgeState, settings: &BridgeSettings) -> Result<BridgeServer> {
    let bind_addr = format!("127.0.0.1:{}", settings.port);
    let server = Server::http(&bind_addr)
        .map_err(|e| anyhow!("Failed to start bridge on {}: {}", bind_addr, e))?;
    let addr = server
        .server_addr()
        .to_ip()
        .ok_or_else(|| anyhow!("Bridge is not bound to a TCP address"))?;

    let auth_token = settings
        .auth_token
        .clone()
        .filter(|t| !t.trim().is_empty());
    info!(
        "[atlabel:http] Bridge listening on http://{} (auth: {})",
        addr,
        if auth_token.is_some() { "enabled" } else { "disabled" }
    );

    let server = Arc::new(server);
    let worker = Arc::clone(&server);
    let handle = thread::spawn(move || serve(&worker, &state, auth_token.as_deref()));

    Ok(BridgeServer {
        server,
        addr,
        handle: Some(handle),
    })
}

fn serve(server: &Server, state: &BridgeState, auth_token: Option<&str>) {
    for mut request in server.incoming_requests() {
        let method = request.method().to_string();
        let url = request.url().to_string();
        let path = url.split('?').next().unwrap_or(url.as_str()).to_string();

        if !is_authorized(&request, auth_token) {
            respond_json(request, &Reply::error(401, "unauthorized"));
            continue;
        }

        let body = match read_request_body(&mut request) {
            Ok(body) => body,
            Err(reply) => {
                respond_json(request, &reply);
                continue;
            }
        };

        let reply = dispatch(state, &method, &path, &body);
        respond_json(request, &reply);
    }
    info!("[atlabel:http] Bridge stopped");
}

fn is_authorized(request: &tiny_http::Request, expected: Option<&str>) -> bool {
    let Some(expected) = expected else {
        return true;
    };

    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(AUTH_HEADER))
        .is_some_and(|h| h.value.as_str() == expected)
}

fn read_request_body(request: &mut tiny_http::Request) -> Result<String, Reply> {
    let mut body = String::new();
    let mut reader = request.as_reader().take((MAX_BODY_BYTES + 1) as u64);
    if let Err(e) = reader.read_to_string(&mut body) {
        error!("[atlabel:http] Failed to read body: {}", e);
        return Err(Reply::error(400, "bad_request"));
    }

    if body.len() > MAX_BODY_BYTES {
        return Err(Reply::error(413, "payload_too_large"));
    }

    Ok(body)
}

fn respond_json(request: tiny_http::Request, reply: &Reply) {
    let body = serde_json::to_string(&reply.body)
        .unwrap_or_else(|_| "{\"error\":\"serialize\"}".to_string());
    let mut response = Response::from_string(body).with_status_code(reply.status);
    if let Ok(header) =
        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
    {
        response = response.with_header(header);
    }
    let _ = request.respond(response);
}
