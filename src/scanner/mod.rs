//! Workspace scanner for listing annotations across files

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::annotation::parse_annotations;
use crate::config::Config;
use crate::Annotation;

/// Annotations found in one file
#[derive(Debug, Clone, Serialize)]
pub struct FileAnnotations {
    pub path: PathBuf,
    pub annotations: Vec<Annotation>,
}

/// Walks a workspace and parses every text file for annotations
pub struct WorkspaceScanner {
    root: PathBuf,
    exclude_patterns: GlobSet,
    excluded_dirs: Vec<String>,
}

impl WorkspaceScanner {
    /// Create a scanner with the default excluded directories
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, &Config::with_defaults())
    }

    /// Create a scanner using the `[indexing]` and `[scan]` config sections
    pub fn with_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.scan.exclude {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!("Ignoring invalid exclude pattern {:?}: {}", pattern, e),
            }
        }

        Self {
            root: root.into(),
            exclude_patterns: builder.build().unwrap_or_else(|_| GlobSet::empty()),
            excluded_dirs: config.indexing.excluded_dirs.clone(),
        }
    }

    /// Scan the workspace; files without annotations are left out
    pub fn scan(&self) -> Result<Vec<FileAnnotations>> {
        let mut found = Vec::new();
        let excluded_dirs = self.excluded_dirs.clone();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| excluded_dirs.iter().any(|d| d == name)))
            })
            .build();

        for entry in walker.flatten() {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if self.is_excluded(path) || !Self::is_parseable(path) {
                continue;
            }

            // Binary or unreadable files are skipped
            let Ok(content) = std::fs::read_to_string(path) else {
                continue;
            };

            let annotations = parse_annotations(&content);
            if !annotations.is_empty() {
                found.push(FileAnnotations {
                    path: path.to_path_buf(),
                    annotations,
                });
            }
        }

        found.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(found)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        self.exclude_patterns.is_match(relative)
            || relative
                .file_name()
                .is_some_and(|name| self.exclude_patterns.is_match(name))
    }

    /// Everything except known binary formats is parsed
    fn is_parseable(path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return true;
        };

        !matches!(
            ext.to_lowercase().as_str(),
            // Images
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "ico" | "webp" | "tiff" | "psd"
            // Audio/Video
            | "mp3" | "mp4" | "wav" | "avi" | "mkv" | "mov" | "flac" | "ogg" | "webm"
            // Archives
            | "zip" | "tar" | "gz" | "bz2" | "xz" | "7z" | "rar" | "dmg" | "iso"
            // Binaries
            | "exe" | "dll" | "so" | "dylib" | "bin" | "o" | "a" | "lib"
            // Documents (binary)
            | "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "odt"
            // Fonts
            | "ttf" | "otf" | "woff" | "woff2" | "eot"
            // Database
            | "db" | "sqlite" | "sqlite3"
            // Lock files (usually auto-generated, large)
            | "lock"
            // Other binary
            | "class" | "pyc" | "pyo" | "wasm" | "rlib"
        )
    }
}
