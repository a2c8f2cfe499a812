//! Error types for atlabel

use crate::host::HostError;

/// Errors surfaced by session setup and host adapters
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No tokio runtime available for debounced indexing: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    #[error("Editor host error: {0}")]
    Host(#[from] HostError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
