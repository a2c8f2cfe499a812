use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single `// @label` annotation and the identifier it resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Trimmed text after the `@`
    pub label: String,

    /// Variable or property name on the first non-blank line below
    pub identifier: String,

    /// Line of the annotation comment (1-indexed)
    pub line_number: usize,

    /// Line the identifier was taken from (1-indexed)
    pub target_line: usize,
}

/// Mapping from label to identifier for one document
///
/// Labels are unique; inserting an existing label replaces its identifier.
/// Iteration is ordered by label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationIndex {
    entries: BTreeMap<String, String>,
}

impl AnnotationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `label -> identifier`, returning the identifier it replaced
    pub fn insert(&mut self, label: impl Into<String>, identifier: impl Into<String>) -> Option<String> {
        self.entries.insert(label.into(), identifier.into())
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(label, identifier)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, i)| (l.as_str(), i.as_str()))
    }
}

impl<L: Into<String>, I: Into<String>> FromIterator<(L, I)> for AnnotationIndex {
    fn from_iter<T: IntoIterator<Item = (L, I)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (label, identifier) in iter {
            index.insert(label, identifier);
        }
        index
    }
}

impl From<&[Annotation]> for AnnotationIndex {
    /// Later annotations overwrite earlier ones with the same label
    fn from(annotations: &[Annotation]) -> Self {
        annotations
            .iter()
            .map(|a| (a.label.clone(), a.identifier.clone()))
            .collect()
    }
}
