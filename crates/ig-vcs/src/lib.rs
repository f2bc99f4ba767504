//! Revision lookup for trace provenance
//!
//! The revision id stamped on each trace entry is metadata, never a gating
//! condition. Every lookup therefore degrades to [`Revision::Unavailable`]
//! (rendered as [`UNKNOWN_REVISION`]) instead of returning an error. The core
//! abstraction is the [`RevisionAdapter`] trait, with a Git implementation and
//! a "none" fallback.

pub mod adapter;
pub mod git;
pub mod none;

use std::path::Path;
use std::time::Duration;

pub use adapter::{Revision, RevisionAdapter, VcsError, UNKNOWN_REVISION};
pub use git::GitRevision;
pub use none::NoneRevision;

/// Default limit for a single revision query.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Pick an adapter for `workspace_root`: Git when a `.git` entry exists in the
/// root or any ancestor, otherwise the no-op adapter.
///
/// The root is canonicalized first so relative paths and symlinks are walked
/// from their real location; if that fails the path is used as given.
pub fn detect(workspace_root: &Path, timeout: Duration) -> Box<dyn RevisionAdapter> {
    let root = workspace_root
        .canonicalize()
        .unwrap_or_else(|_| workspace_root.to_path_buf());
    let in_git_tree = root.ancestors().any(|dir| dir.join(".git").exists());
    if in_git_tree {
        Box::new(GitRevision::new(root).with_timeout(timeout))
    } else {
        Box::new(NoneRevision::new())
    }
}

/// Current revision of `workspace_root`, or the sentinel on any failure.
pub fn current_revision(workspace_root: &Path, timeout: Duration) -> String {
    detect(workspace_root, timeout)
        .current_revision()
        .as_str()
        .to_string()
}
