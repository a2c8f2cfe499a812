use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// URI scheme of documents backed by a file on disk
pub const FILE_SCHEME: &str = "file";

/// Stable identity of a document (canonical URI string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentKey(String);

impl DocumentKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An open text buffer as seen by the editor
///
/// The text itself is not part of the document: it is always read live from
/// the host, so a debounced scan sees the buffer as it is when it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identity used as the key into the index store
    pub key: DocumentKey,

    /// URI scheme (`file`, `untitled`, `git`, ...)
    pub scheme: String,

    /// File system path, if the document has one
    pub path: Option<PathBuf>,
}

impl Document {
    /// Create a file-backed document for a path on disk
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = Url::from_file_path(&path)
            .map(String::from)
            .unwrap_or_else(|_| format!("{}://{}", FILE_SCHEME, path.display()));
        Self {
            key: DocumentKey::new(key),
            scheme: FILE_SCHEME.to_string(),
            path: Some(path),
        }
    }

    /// Create a document from a URI as reported by the editor
    ///
    /// The scheme is everything before the first `:`. For `file` URIs the
    /// explicit `path` wins; otherwise the URI is decoded into a path.
    pub fn from_uri(uri: &str, path: Option<PathBuf>) -> Self {
        let scheme = uri
            .split_once(':')
            .map(|(scheme, _)| scheme.to_lowercase())
            .unwrap_or_default();

        let path = if scheme == FILE_SCHEME {
            path.or_else(|| Url::parse(uri).ok()?.to_file_path().ok())
        } else {
            path
        };

        Self {
            key: DocumentKey::new(uri),
            scheme,
            path,
        }
    }

    /// Whether the document is backed by a real file
    pub fn is_file(&self) -> bool {
        self.scheme == FILE_SCHEME && self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
