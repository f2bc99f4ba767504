// hasher.rs — SHA-256 content fingerprints.
//
// Digests are lowercase hex. Trace entries store them with a `sha256:`
// prefix; callers may hand us either form.

use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::AuditError;

/// Prefix used for digests stored in trace entries.
pub const DIGEST_PREFIX: &str = "sha256:";

/// Current fingerprint of a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFingerprint {
    /// The file exists; hex digest of its bytes.
    Present(String),
    /// The file does not exist yet (a valid precondition for a first write).
    Absent,
}

impl FileFingerprint {
    /// The digest, if the file exists.
    pub fn digest(&self) -> Option<&str> {
        match self {
            FileFingerprint::Present(d) => Some(d),
            FileFingerprint::Absent => None,
        }
    }
}

/// Hash arbitrary bytes, returning a lowercase hex-encoded SHA-256 string.
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Hash a UTF-8 string.
pub fn hash_str(s: &str) -> String {
    hash_bytes(s.as_bytes())
}

/// Hash the file at `path`. A missing file is `Absent`, not an error.
pub fn hash_file(path: &Path) -> Result<FileFingerprint, AuditError> {
    match std::fs::read(path) {
        Ok(data) => Ok(FileFingerprint::Present(hash_bytes(&data))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileFingerprint::Absent),
        Err(source) => Err(AuditError::HashFileFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// `sha256:<hex>` form of a hex digest.
pub fn prefixed(hex: &str) -> String {
    format!("{}{}", DIGEST_PREFIX, hex)
}

/// Strip an optional `sha256:` prefix (any case) and lowercase the hex.
pub fn normalize_digest(digest: &str) -> String {
    let lowered = digest.trim().to_ascii_lowercase();
    match lowered.strip_prefix(DIGEST_PREFIX) {
        Some(hex) => hex.to_string(),
        None => lowered,
    }
}

/// First `n` characters of a digest, for human-facing messages.
pub fn short(digest: &str, n: usize) -> &str {
    match digest.char_indices().nth(n) {
        Some((idx, _)) => &digest[..idx],
        None => digest,
    }
}
