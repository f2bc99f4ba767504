// log.rs — Append-only JSONL agent trace.
//
// Each entry is serialized to one line and written with a single
// `write_all` on a file opened in append mode. Interleaved appends from one
// process stay line-atomic in practice; if the process dies mid-write, at
// most the last partial line is lost. Readers skip blank lines.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::AuditError;
use crate::trace::TraceEntry;

/// Handle on a trace log file. Opens the file per append; holds no descriptor.
#[derive(Debug, Clone)]
pub struct TraceLog {
    path: PathBuf,
}

impl TraceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one entry as a JSON line, creating the file and its parent
    /// directory if needed.
    pub fn append(&self, entry: &TraceEntry) -> Result<(), AuditError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| AuditError::OpenFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditError::OpenFailed {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| AuditError::WriteFailed {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(id = %entry.id, intent = %entry.intent_id, "trace entry appended");
        Ok(())
    }

    /// Read every entry, oldest first. A missing file yields an empty list.
    pub fn read_all(&self) -> Result<Vec<TraceEntry>, AuditError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path).map_err(|source| AuditError::OpenFailed {
            path: self.path.clone(),
            source,
        })?;
        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| AuditError::OpenFailed {
                path: self.path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }
        Ok(entries)
    }

    /// Return the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
