//! "None" adapter - fallback for workspaces without version control

use crate::adapter::{RevisionAdapter, VcsError};

/// Adapter that never has a revision.
///
/// Selected automatically when the workspace is not inside a Git tree.
pub struct NoneRevision;

impl NoneRevision {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoneRevision {
    fn default() -> Self {
        Self::new()
    }
}

impl RevisionAdapter for NoneRevision {
    fn query(&self) -> Result<String, VcsError> {
        Err(VcsError::CommandFailed("no version control".to_string()))
    }

    fn name(&self) -> &str {
        "none"
    }
}
