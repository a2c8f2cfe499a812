//! Serve command implementation

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use atlabel::bridge::{start_bridge_server, BridgeState};
use atlabel::config::Config;
use atlabel::host::BufferHost;
use atlabel::session::Session;

/// Run the editor bridge until Ctrl-C
pub async fn serve_command(work_dir: &Path, config: &Config, port: Option<u16>) -> Result<()> {
    let mut settings = config.bridge.clone();
    if let Some(port) = port {
        settings.port = port;
    }

    let root = work_dir
        .canonicalize()
        .unwrap_or_else(|_| work_dir.to_path_buf());
    let host = Arc::new(BufferHost::new(vec![root]));
    let session = Arc::new(Session::activate(Arc::clone(&host), &config.indexing)?);

    let server = start_bridge_server(
        BridgeState {
            host,
            session: Arc::clone(&session),
        },
        &settings,
    )?;
    println!("Bridge listening on http://{} (Ctrl-C to stop)", server.addr());

    tokio::signal::ctrl_c().await?;

    server.shutdown();
    session.deactivate();
    println!("Stopped.");

    Ok(())
}
