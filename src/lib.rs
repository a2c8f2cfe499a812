//! atlabel - annotation-to-identifier completion
//!
//! A line comment of the form `// @label` placed directly above a variable
//! declaration or object property teaches atlabel that `label` refers to that
//! identifier. Typing `@label` anywhere else in the same document then offers a
//! completion that replaces the typed text with the identifier.
//!
//! ## Pieces
//!
//! 1. **Annotation parser**: turns a document's text into an [`AnnotationIndex`].
//! 2. **Indexing controller**: reacts to editor lifecycle events, filters out
//!    ineligible documents and debounces re-indexing per document.
//! 3. **Completion provider**: serves candidates for the text before the cursor
//!    from the current index of the document.
//!
//! Editors talk to a [`session::Session`] either in-process through the
//! [`host::EditorHost`] trait or over the local HTTP [`bridge`].

pub mod annotation;
pub mod bridge;
pub mod completion;
pub mod config;
pub mod debounce;
pub mod domain;
pub mod error;
pub mod host;
pub mod index;
pub mod indexing;
pub mod scanner;
pub mod session;

pub use domain::*;
pub use error::{Error, Result};
