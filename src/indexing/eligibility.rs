//! Which documents get indexed at all

use std::path::{Component, PathBuf};

use crate::Document;

/// Why a document was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligible {
    /// Unsaved or virtual buffer
    NotAFile,
    /// Path is under none of the workspace roots, or climbs out with `..`
    OutsideWorkspace,
    /// Path runs through an excluded directory
    ExcludedDirectory(String),
}

/// Eligibility filter applied before any scan work
#[derive(Debug, Clone)]
pub struct Eligibility {
    excluded_dirs: Vec<String>,
}

impl Eligibility {
    pub fn new(excluded_dirs: Vec<String>) -> Self {
        Self { excluded_dirs }
    }

    /// Check a document against the workspace roots
    pub fn check(&self, document: &Document, roots: &[PathBuf]) -> Result<(), Ineligible> {
        let path = match document.path() {
            Some(path) if document.is_file() => path,
            _ => return Err(Ineligible::NotAFile),
        };

        let climbs = path.components().any(|c| matches!(c, Component::ParentDir));
        if climbs || !roots.iter().any(|root| path.starts_with(root)) {
            return Err(Ineligible::OutsideWorkspace);
        }

        let excluded = path.components().find_map(|component| match component {
            Component::Normal(segment) => {
                let segment = segment.to_str()?;
                self.excluded_dirs
                    .iter()
                    .find(|dir| dir.as_str() == segment)
                    .cloned()
            }
            _ => None,
        });

        match excluded {
            Some(dir) => Err(Ineligible::ExcludedDirectory(dir)),
            None => Ok(()),
        }
    }

    pub fn is_eligible(&self, document: &Document, roots: &[PathBuf]) -> bool {
        self.check(document, roots).is_ok()
    }
}

impl Default for Eligibility {
    fn default() -> Self {
        Self::new(crate::config::IndexingSettings::default().excluded_dirs)
    }
}
