//! Core RevisionAdapter trait and result types

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Sentinel recorded when no revision id can be determined.
pub const UNKNOWN_REVISION: &str = "unknown";

/// Errors from a revision query. Only surfaced to logs, never to callers of
/// [`RevisionAdapter::current_revision`].
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("VCS operation failed: {0}")]
    CommandFailed(String),

    #[error("VCS returned no revision")]
    EmptyOutput,
}

/// Outcome of a revision lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Known(String),
    Unavailable,
}

impl Revision {
    /// The revision id, or [`UNKNOWN_REVISION`].
    pub fn as_str(&self) -> &str {
        match self {
            Revision::Known(id) => id,
            Revision::Unavailable => UNKNOWN_REVISION,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Revision::Known(_))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pluggable source of the workspace's current revision id.
pub trait RevisionAdapter: Send + Sync {
    /// Query the revision. Errors are reported as-is so adapters can be tested.
    fn query(&self) -> Result<String, VcsError>;

    /// Adapter display name (for logs and CLI output)
    fn name(&self) -> &str;

    /// Query the revision, degrading every failure to `Unavailable`.
    fn current_revision(&self) -> Revision {
        match self.query() {
            Ok(id) => Revision::Known(id),
            Err(e) => {
                tracing::debug!(adapter = self.name(), error = %e, "revision unavailable");
                Revision::Unavailable
            }
        }
    }
}
