//! Completion of `@label` references

mod resolver;

pub use resolver::{resolve_completions, typed_prefix};

use crate::index::DocumentIndexStore;
use crate::{CompletionCandidate, Document, Position};

/// Serves completion requests from the document index store
///
/// Nothing is cached between requests: every call reads the store entry that
/// is current at that moment.
#[derive(Debug, Clone)]
pub struct CompletionProvider {
    store: DocumentIndexStore,
}

impl CompletionProvider {
    pub fn new(store: DocumentIndexStore) -> Self {
        Self { store }
    }

    /// Candidates for a cursor on `line_text`
    ///
    /// Only the part of `line_text` before `position.character` is considered.
    /// Non-file documents and documents without an index yield nothing.
    pub fn provide(
        &self,
        document: &Document,
        line_text: &str,
        position: Position,
    ) -> Vec<CompletionCandidate> {
        if !document.is_file() {
            return Vec::new();
        }
        let Some(index) = self.store.get(&document.key) else {
            return Vec::new();
        };

        let prefix = utf16_prefix(line_text, position.character);
        resolve_completions(&index, prefix, position)
    }

    /// Candidates for a cursor in a full document text
    pub fn provide_in_text(
        &self,
        document: &Document,
        text: &str,
        position: Position,
    ) -> Vec<CompletionCandidate> {
        match line_at(text, position.line) {
            Some(line) => self.provide(document, line, position),
            None => Vec::new(),
        }
    }
}

/// The part of `line` before UTF-16 column `column`
///
/// A column that falls inside a surrogate pair cuts before that character.
pub fn utf16_prefix(line: &str, column: u32) -> &str {
    let mut units = 0;
    for (offset, ch) in line.char_indices() {
        units += ch.len_utf16();
        if units > column as usize {
            return &line[..offset];
        }
    }
    line
}

/// Line `line` (0-based) of `text` without its terminator
pub fn line_at(text: &str, line: u32) -> Option<&str> {
    text.split('\n')
        .nth(line as usize)
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnnotationIndex, DocumentKey};

    fn provider_with(key: &DocumentKey, pairs: &[(&str, &str)]) -> CompletionProvider {
        let store = DocumentIndexStore::new();
        store.set(key.clone(), pairs.iter().copied().collect::<AnnotationIndex>());
        CompletionProvider::new(store)
    }

    #[test]
    fn test_line_at() {
        let text = "first\r\nsecond\n\nlast\n";
        assert_eq!(line_at(text, 0), Some("first"));
        assert_eq!(line_at(text, 1), Some("second"));
        assert_eq!(line_at(text, 2), Some(""));
        assert_eq!(line_at(text, 4), Some(""));
        assert_eq!(line_at(text, 5), None);
    }

    #[test]
    fn test_utf16_prefix() {
        assert_eq!(utf16_prefix("😀 f(@u)", 7), "😀 f(@u");
        assert_eq!(utf16_prefix("😀 f(@u)", 1), "");
        assert_eq!(utf16_prefix("😀 f(@u)", 2), "😀");
        assert_eq!(utf16_prefix("abc", 10), "abc");
        assert_eq!(utf16_prefix("abc", 0), "");
    }

    #[test]
    fn test_emoji_before_trigger() {
        let doc = Document::file("/work/a.ts");
        let provider = provider_with(&doc.key, &[("uid", "userId")]);

        let items = provider.provide(&doc, "😀 f(@u)", Position::new(2, 7));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].edit.range.start, Position::new(2, 5));
        assert_eq!(items[0].edit.range.end, Position::new(2, 7));
    }

    #[test]
    fn test_provide_uses_text_before_cursor() {
        let doc = Document::file("/work/a.ts");
        let provider = provider_with(&doc.key, &[("uid", "userId")]);

        // Text after the cursor is ignored
        let items = provider.provide(&doc, "log(@u) + rest", Position::new(0, 6));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].edit.range.start, Position::new(0, 4));
        assert_eq!(items[0].edit.range.end, Position::new(0, 6));
    }

    #[test]
    fn test_provide_in_text() {
        let doc = Document::file("/work/a.ts");
        let provider = provider_with(&doc.key, &[("uid", "userId")]);

        let text = "// @uid\nconst userId = 5;\nconsole.log(@u";
        let items = provider.provide_in_text(&doc, text, Position::new(2, 14));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].edit.new_text, "userId");

        assert!(provider.provide_in_text(&doc, text, Position::new(9, 0)).is_empty());
    }

    #[test]
    fn test_non_file_document_gets_nothing() {
        let doc = Document::from_uri("untitled:Untitled-1", None);
        let provider = provider_with(&doc.key, &[("uid", "userId")]);
        assert!(provider.provide(&doc, "@u", Position::new(0, 2)).is_empty());
    }

    #[test]
    fn test_missing_index_is_empty() {
        let provider = CompletionProvider::new(DocumentIndexStore::new());
        let doc = Document::file("/work/a.ts");
        assert!(provider.provide(&doc, "@", Position::new(0, 1)).is_empty());
    }
}
