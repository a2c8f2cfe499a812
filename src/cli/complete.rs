//! Complete command implementation

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use atlabel::config::Config;
use atlabel::host::BufferHost;
use atlabel::session::Session;
use atlabel::{Document, Position};

/// Offer completions for a cursor in `file`, as if it were the visible editor
pub fn complete_command(
    work_dir: &Path,
    config: &Config,
    file: &Path,
    position: Position,
    json: bool,
) -> Result<()> {
    let root = work_dir
        .canonicalize()
        .with_context(|| format!("Workspace not found: {}", work_dir.display()))?;
    let path = if file.is_absolute() {
        file.to_path_buf()
    } else {
        std::env::current_dir()?.join(file)
    };
    let path = path
        .canonicalize()
        .with_context(|| format!("File not found: {}", file.display()))?;
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let host = Arc::new(BufferHost::new(vec![root]));
    let document = Document::file(path);
    host.open(document.clone(), text.as_str())?;
    host.set_visible(&[document.key.clone()])?;

    let session = Session::activate(host, &config.indexing)?;
    let items = session.completions_in_text(&document, &text, position);
    session.deactivate();

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No completions.");
        return Ok(());
    }

    for item in &items {
        let edit = &item.edit;
        println!(
            "  @{:<20} {}  [{}:{}-{}:{}]",
            item.label,
            item.detail,
            edit.range.start.line,
            edit.range.start.character,
            edit.range.end.line,
            edit.range.end.character
        );
    }

    Ok(())
}
