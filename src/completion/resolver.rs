//! Matching a typed `@prefix` against a document's labels

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{AnnotationIndex, CompletionCandidate, Position, Range, TextEdit};

/// Trailing `@` plus the non-blank run typed after it
static TRIGGER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([^\s@]*)$").expect("trigger pattern is valid"));

/// Text typed after the last unmatched `@` before the cursor
///
/// `Some("")` when the cursor sits right after `@`; `None` when there is no
/// `@` run ending at the cursor.
pub fn typed_prefix(line_prefix: &str) -> Option<&str> {
    TRIGGER_PATTERN
        .captures(line_prefix)
        .map(|captures| captures.get(1).map_or("", |m| m.as_str()))
}

/// Compute completion candidates for the text before the cursor
///
/// Every label starting with the typed text (case-sensitive) yields one
/// candidate, in index order. Accepting a candidate replaces `@typed` with the
/// identifier.
pub fn resolve_completions(
    index: &AnnotationIndex,
    line_prefix: &str,
    cursor: Position,
) -> Vec<CompletionCandidate> {
    let Some(typed) = typed_prefix(line_prefix) else {
        return Vec::new();
    };

    let range = replacement_range(typed, cursor);

    index
        .iter()
        .filter(|(label, _)| label.starts_with(typed))
        .map(|(label, identifier)| {
            CompletionCandidate::new(
                label,
                identifier,
                TextEdit {
                    range,
                    new_text: identifier.to_string(),
                },
            )
        })
        .collect()
}

/// Span covering `@typed` up to the cursor, or an insertion at the cursor if
/// the line is too short to hold it
fn replacement_range(typed: &str, cursor: Position) -> Range {
    let span = typed.encode_utf16().count() as u32 + 1;
    if cursor.character >= span {
        Range::new(Position::new(cursor.line, cursor.character - span), cursor)
    } else {
        Range::empty(cursor)
    }
}
