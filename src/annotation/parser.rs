//! Annotation parsing
//!
//! Syntax: a `//` line comment whose content starts with a single `@`, followed
//! by the label. The first non-blank line below it names the identifier:
//!
//! ```text
//! // @uid
//! const userId = 5;        -> uid => userId
//!
//! // @retry budget
//!   maxRetries: 3,         -> retry budget => maxRetries
//! ```
//!
//! Matching is purely lexical. Anything that doesn't fit the patterns is
//! skipped without error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Annotation, AnnotationIndex};

/// `// @label`, rejecting `// @@marker` style comments
static ANNOTATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//\s*@\s*([^\s@].*)").expect("annotation pattern is valid"));

/// `const name =`, `let name =`, `var name =`
static DECLARATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=")
        .expect("declaration pattern is valid")
});

/// `name:` at the start of a line (after indentation)
static PROPERTY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_$][\w$]*):").expect("property pattern is valid")
});

/// Build the label index for a document's full text
///
/// Annotations are applied top to bottom, so a label declared twice maps to
/// the identifier below its last occurrence.
pub fn scan(text: &str) -> AnnotationIndex {
    AnnotationIndex::from(parse_annotations(text).as_slice())
}

/// Extract every resolvable annotation in line order
pub fn parse_annotations(text: &str) -> Vec<Annotation> {
    let lines: Vec<&str> = text.lines().collect();
    let mut annotations = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(label) = parse_label(line) else {
            continue;
        };

        let Some((target_idx, target)) = next_non_blank(&lines, idx + 1) else {
            continue;
        };

        if let Some(identifier) = parse_identifier(target) {
            annotations.push(Annotation {
                label: label.to_string(),
                identifier: identifier.to_string(),
                line_number: idx + 1,
                target_line: target_idx + 1,
            });
        }
    }

    annotations
}

/// Label of an annotation comment, trimmed
pub fn parse_label(line: &str) -> Option<&str> {
    let captures = ANNOTATION_PATTERN.captures(line)?;
    let label = captures.get(1)?.as_str().trim();
    (!label.is_empty()).then_some(label)
}

/// Identifier declared on a line; declarations win over properties
pub fn parse_identifier(line: &str) -> Option<&str> {
    DECLARATION_PATTERN
        .captures(line)
        .or_else(|| PROPERTY_PATTERN.captures(line))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

fn next_non_blank<'a>(lines: &[&'a str], from: usize) -> Option<(usize, &'a str)> {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx, *line))
}
