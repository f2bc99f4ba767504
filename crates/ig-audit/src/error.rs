// error.rs — Error types for the audit subsystem.
//
// Callers in the post-hook log and swallow every one of these: a broken
// audit trail must never undo or block a tool call that already ran.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during audit operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Failed to open or create an audit file.
    #[error("failed to open {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a record.
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize or deserialize a trace entry.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Failed to read a file for hashing.
    #[error("failed to hash file at {path}: {source}")]
    HashFileFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}
