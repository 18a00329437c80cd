use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting combinations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store file exists but is not valid JSON (or not our shape).
    #[error("Malformed store file {path}: {message}")]
    Malformed { path: PathBuf, message: String },
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
