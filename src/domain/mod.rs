//! Core domain types for atlabel

mod annotation;
mod completion;
mod document;

pub use annotation::{Annotation, AnnotationIndex};
pub use completion::{CompletionCandidate, Position, Range, TextEdit};
pub use document::{Document, DocumentKey, FILE_SCHEME};
