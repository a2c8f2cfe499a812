use serde::{Deserialize, Serialize};

/// Zero-based line and character offset in a document
///
/// `character` counts UTF-16 code units, as editors report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open span between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at a position (pure insertion)
    pub fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Replace the text in `range` with `new_text`; an empty range inserts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

/// A completion item offered for a typed `@prefix`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCandidate {
    /// Shown in the completion list
    pub label: String,

    /// Identifier the label resolves to
    pub identifier: String,

    /// Human readable explanation
    pub detail: String,

    /// Annotation matches are always preselected so they rank above other items
    pub preselect: bool,

    /// Edit applied when the candidate is accepted
    pub edit: TextEdit,
}

impl CompletionCandidate {
    pub fn new(label: &str, identifier: &str, edit: TextEdit) -> Self {
        Self {
            label: label.to_string(),
            identifier: identifier.to_string(),
            detail: format!("replaces with: `{}`", identifier),
            preselect: true,
            edit,
        }
    }

    /// Whether accepting this candidate deletes typed text
    pub fn replaces(&self) -> bool {
        !self.edit.range.is_empty()
    }
}
