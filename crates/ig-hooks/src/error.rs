// error.rs — Error types for the hook layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur outside the decision path (settings, hook I/O).
///
/// None of these ever turn into a denial.
#[derive(Debug, Error)]
pub enum GateError {
    /// The settings file exists but is not valid TOML for `GateSettings`.
    #[error("invalid settings in {path}: {source}")]
    Settings {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An invocation context could not be parsed.
    #[error("invalid invocation context: {0}")]
    Invocation(#[from] serde_json::Error),
}
