//! Scan command implementation

use anyhow::Result;
use std::path::Path;

use atlabel::config::Config;
use atlabel::scanner::WorkspaceScanner;

/// Walk the workspace and list every annotation with its identifier
pub fn scan_command(work_dir: &Path, config: &Config, json: bool) -> Result<()> {
    let scanner = WorkspaceScanner::with_config(work_dir, config);
    let files = scanner.scan()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    if files.is_empty() {
        println!("No annotations found.");
        return Ok(());
    }

    let total: usize = files.iter().map(|f| f.annotations.len()).sum();
    println!("Found {} annotation(s) in {} file(s):\n", total, files.len());

    for file in &files {
        let display = file.path.strip_prefix(work_dir).unwrap_or(&file.path);
        for annotation in &file.annotations {
            println!(
                "  @{} -> {}  {}:{}",
                annotation.label,
                annotation.identifier,
                display.display(),
                annotation.line_number
            );
        }
    }

    Ok(())
}
