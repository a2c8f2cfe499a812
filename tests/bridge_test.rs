//! HTTP bridge over a real socket

mod common;

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use atlabel::bridge::{start_bridge_server, BridgeServer, BridgeState};
use atlabel::config::BridgeSettings;

use common::{activate, workspace_host};

fn start(auth_token: Option<&str>) -> BridgeServer {
    let host = workspace_host();
    let session = Arc::new(activate(&host));
    let settings = BridgeSettings {
        port: 0,
        auth_token: auth_token.map(str::to_string),
    };
    start_bridge_server(BridgeState { host, session }, &settings)
        .expect("Failed to start bridge")
}

/// Send one request and return (status, JSON body)
fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (u16, Value) {
    let body = body.map(|b| b.to_string()).unwrap_or_default();
    let mut stream = TcpStream::connect(addr).expect("Failed to connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    let mut head = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\nContent-Type: application/json\r\nContent-Length: {}\r\n",
        method,
        path,
        addr,
        body.len()
    );
    if let Some(token) = token {
        head.push_str(&format!("X-Atlabel-Token: {}\r\n", token));
    }
    head.push_str("\r\n");

    stream.write_all(head.as_bytes()).unwrap();
    stream.write_all(body.as_bytes()).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();

    let status = response
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("Malformed status line");
    let payload = response
        .split_once("\r\n\r\n")
        .map(|(_, body)| body)
        .unwrap_or("");
    (status, serde_json::from_str(payload).unwrap_or(Value::Null))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_ping() {
    let server = start(None);
    let addr = server.addr();

    let (status, body) = tokio::task::spawn_blocking(move || {
        request(addr, "GET", "/ping", None, None)
    })
    .await
    .unwrap();

    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_token_is_required_when_configured() {
    let server = start(Some("secret"));
    let addr = server.addr();

    let (denied, allowed) = tokio::task::spawn_blocking(move || {
        (
            request(addr, "GET", "/ping", None, None),
            request(addr, "GET", "/ping", None, Some("secret")),
        )
    })
    .await
    .unwrap();

    assert_eq!(denied.0, 401);
    assert_eq!(denied.1["error"], "unauthorized");
    assert_eq!(allowed.0, 200);
    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_visible_document_completes_after_window() {
    let server = start(None);
    let addr = server.addr();

    let visible = json!({
        "documents": [{
            "uri": "file:///work/a.ts",
            "text": "// @uid\nconst userId = 5;\n"
        }]
    });
    let (status, _) = tokio::task::spawn_blocking(move || {
        request(addr, "POST", "/documents/visible", Some(visible), None)
    })
    .await
    .unwrap();
    assert_eq!(status, 200);

    tokio::time::sleep(Duration::from_millis(600)).await;

    let completion = json!({
        "uri": "file:///work/a.ts",
        "line": 2,
        "character": 2,
        "line_text": "@u"
    });
    let (status, body) = tokio::task::spawn_blocking(move || {
        request(addr, "POST", "/completion", Some(completion), None)
    })
    .await
    .unwrap();

    assert_eq!(status, 200);
    assert_eq!(body["items"][0]["label"], "uid");
    assert_eq!(body["items"][0]["edit"]["new_text"], "userId");
    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unknown_route() {
    let server = start(None);
    let addr = server.addr();

    let (status, body) = tokio::task::spawn_blocking(move || {
        request(addr, "DELETE", "/documents", None, None)
    })
    .await
    .unwrap();

    assert_eq!(status, 404);
    assert_eq!(body["error"], "not_found");
    server.shutdown();
}
