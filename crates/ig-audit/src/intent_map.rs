// intent_map.rs — Markdown spatial index mapping files to intents.
//
// The index is a read-then-append table. It is not safe against truly
// concurrent writers: it relies on tool calls being serialized within one
// agent session. Cross-session writers to the same workspace are unsupported.
//
// Duplicate suppression looks only at the last data row: a row whose intent
// id, intent name and path equal the last row is skipped. The timestamp is
// not compared.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::AuditError;

const HEADER: &str = "| Intent ID | Intent Name | File Path | Last Modified |\n|---|---|---|---|\n";
const TITLE: &str = "# Intent Map\n\n";

/// One data row of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentMapRow {
    pub intent_id: String,
    pub intent_name: String,
    pub file_path: String,
    pub last_modified: String,
}

impl IntentMapRow {
    pub fn new(
        intent_id: impl Into<String>,
        intent_name: impl Into<String>,
        file_path: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            intent_id: intent_id.into(),
            intent_name: intent_name.into(),
            file_path: file_path.into(),
            last_modified: at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Render as a Markdown table line (no trailing newline).
    pub fn to_markdown(&self) -> String {
        format!(
            "| {} | {} | {} | {} |",
            escape_cell(&self.intent_id),
            escape_cell(&self.intent_name),
            escape_cell(&self.file_path),
            escape_cell(&self.last_modified)
        )
    }

    /// Parse a Markdown table line produced by [`to_markdown`](Self::to_markdown).
    pub fn parse(line: &str) -> Option<Self> {
        let inner = line.trim().strip_prefix('|')?.strip_suffix('|')?;
        let cells: Vec<String> = split_cells(inner);
        if cells.len() != 4 || cells[0].starts_with("---") || cells[0] == "Intent ID" {
            return None;
        }
        let mut cells = cells.into_iter();
        Some(Self {
            intent_id: cells.next()?,
            intent_name: cells.next()?,
            file_path: cells.next()?,
            last_modified: cells.next()?,
        })
    }

    fn same_target(&self, other: &IntentMapRow) -> bool {
        self.intent_id == other.intent_id
            && self.intent_name == other.intent_name
            && self.file_path == other.file_path
    }
}

/// Handle on the `intent_map.md` file.
#[derive(Debug, Clone)]
pub struct IntentMap {
    path: PathBuf,
}

impl IntentMap {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `row` unless it repeats the last row. Creates the file with a
    /// header on first write. Returns whether a row was written.
    pub fn upsert(&self, row: &IntentMapRow) -> Result<bool, AuditError> {
        let existing = match fs::read_to_string(&self.path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(AuditError::OpenFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if let Some(text) = &existing {
            let last = text.lines().rev().find(|l| !l.trim().is_empty());
            if let Some(prev) = last.and_then(IntentMapRow::parse) {
                if prev.same_target(row) {
                    tracing::debug!(path = %row.file_path, "intent map row unchanged; skipped");
                    return Ok(false);
                }
            }
        }

        let mut out = String::new();
        match existing.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                if !text.ends_with('\n') {
                    out.push('\n');
                }
            }
            // Missing or blank file: start a fresh table.
            _ => {
                out.push_str(TITLE);
                out.push_str(HEADER);
            }
        }
        out.push_str(&row.to_markdown());
        out.push('\n');

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| AuditError::OpenFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditError::OpenFailed {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(out.as_bytes())
            .map_err(|source| AuditError::WriteFailed {
                path: self.path.clone(),
                source,
            })?;
        Ok(true)
    }

    /// All data rows, in file order. A missing file has no rows.
    pub fn rows(&self) -> Result<Vec<IntentMapRow>, AuditError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text.lines().filter_map(IntentMapRow::parse).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(AuditError::OpenFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Split on unescaped `|` and unescape.
fn split_cells(inner: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}
