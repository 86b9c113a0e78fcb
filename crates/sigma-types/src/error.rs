//! Error types for SIGMA.

use std::io;

/// Errors produced by the SIGMA crates.
#[derive(Debug, thiserror::Error)]
pub enum SigmaError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("audio error: {0}")]
    Audio(String),

    #[error("mission store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SigmaError>;
