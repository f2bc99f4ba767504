// trace.rs — Agent trace data model.
//
// One TraceEntry is written per allowed mutating tool call. The shape is
// nested (entry → files → conversations → ranges) so one record can later
// carry several files or conversations, but the post-hook always writes
// exactly one of each.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hasher;

/// Category of change a mutation represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationClass {
    /// Work that moves the governing intent forward.
    #[default]
    IntentEvolution,
    /// Structure-preserving refactor.
    AstRefactor,
    BugFix,
    Documentation,
}

/// Version-control provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VcsInfo {
    /// Revision id, or the resolver's sentinel when unavailable.
    pub revision_id: String,
}

/// Who produced the change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contributor {
    /// Entity type, e.g. "AI" or "HUMAN".
    pub entity_type: String,
    pub model_identifier: String,
}

/// A line range of the new content and its digest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentRange {
    pub start_line: usize,
    pub end_line: usize,
    /// `sha256:<hex>` of the full new content.
    pub content_hash: String,
}

/// Backlink from a conversation to the artifact that governs it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelatedRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// The session that produced a change to one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    /// Session or log identifier of the acting agent.
    pub url: String,
    pub contributor: Contributor,
    pub ranges: Vec<ContentRange>,
    pub related: Vec<RelatedRef>,
}

/// All recorded changes to one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileTrace {
    /// Workspace-relative path with `/` separators.
    pub relative_path: String,
    pub conversations: Vec<Conversation>,
}

/// One line of `agent_trace.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub vcs: VcsInfo,
    pub intent_id: String,
    pub mutation_class: MutationClass,
    pub files: Vec<FileTrace>,
}

impl TraceEntry {
    /// Start building an entry for a change to `relative_path` under `intent_id`.
    pub fn builder(
        intent_id: impl Into<String>,
        relative_path: impl Into<String>,
    ) -> TraceEntryBuilder {
        TraceEntryBuilder {
            intent_id: intent_id.into(),
            relative_path: relative_path.into(),
            revision_id: String::new(),
            mutation_class: MutationClass::default(),
            session: String::new(),
            entity_type: String::new(),
            model_identifier: String::new(),
            content: String::new(),
        }
    }

    /// The digest recorded for the first range of the first file, if any.
    pub fn content_hash(&self) -> Option<&str> {
        self.files
            .first()
            .and_then(|f| f.conversations.first())
            .and_then(|c| c.ranges.first())
            .map(|r| r.content_hash.as_str())
    }
}

/// Builder for [`TraceEntry`].
///
/// Each setter returns self so calls chain:
///   `TraceEntry::builder("INT-1", "a.rs").content("...").build()`
#[derive(Debug, Clone)]
pub struct TraceEntryBuilder {
    intent_id: String,
    relative_path: String,
    revision_id: String,
    mutation_class: MutationClass,
    session: String,
    entity_type: String,
    model_identifier: String,
    content: String,
}

impl TraceEntryBuilder {
    pub fn revision(mut self, revision_id: impl Into<String>) -> Self {
        self.revision_id = revision_id.into();
        self
    }

    pub fn mutation_class(mut self, class: MutationClass) -> Self {
        self.mutation_class = class;
        self
    }

    pub fn session(mut self, session: impl Into<String>) -> Self {
        self.session = session.into();
        self
    }

    pub fn contributor(
        mut self,
        entity_type: impl Into<String>,
        model_identifier: impl Into<String>,
    ) -> Self {
        self.entity_type = entity_type.into();
        self.model_identifier = model_identifier.into();
        self
    }

    /// The new content of the file after the mutation.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Finish the entry with a fresh id and the current timestamp.
    pub fn build(self) -> TraceEntry {
        let range = ContentRange {
            start_line: 1,
            end_line: line_count(&self.content),
            content_hash: hasher::prefixed(&hasher::hash_str(&self.content)),
        };
        let conversation = Conversation {
            url: self.session,
            contributor: Contributor {
                entity_type: self.entity_type,
                model_identifier: self.model_identifier,
            },
            ranges: vec![range],
            related: vec![RelatedRef {
                kind: "specification".to_string(),
                value: self.intent_id.clone(),
            }],
        };
        TraceEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            vcs: VcsInfo {
                revision_id: self.revision_id,
            },
            intent_id: self.intent_id,
            mutation_class: self.mutation_class,
            files: vec![FileTrace {
                relative_path: self.relative_path,
                conversations: vec![conversation],
            }],
        }
    }
}

/// Number of lines in `content`, counting a trailing partial line.
///
/// This is the coarse span recorded for every change: the whole new file,
/// not the edited region.
pub fn line_count(content: &str) -> usize {
    content.lines().count().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TraceEntry {
        TraceEntry::builder("INT-001", "src/api/weather.ts")
            .revision("abc123")
            .session("task-42")
            .contributor("AI", "test-model")
            .content("line one\nline two\nline three\n")
            .build()
    }

    #[test]
    fn builder_fills_nested_shape() {
        let entry = sample();
        assert_eq!(entry.intent_id, "INT-001");
        assert_eq!(entry.vcs.revision_id, "abc123");
        assert_eq!(entry.files.len(), 1);
        let file = &entry.files[0];
        assert_eq!(file.relative_path, "src/api/weather.ts");
        let conv = &file.conversations[0];
        assert_eq!(conv.url, "task-42");
        assert_eq!(conv.contributor.model_identifier, "test-model");
        assert_eq!(conv.ranges[0].start_line, 1);
        assert_eq!(conv.ranges[0].end_line, 3);
        assert_eq!(conv.related[0].kind, "specification");
        assert_eq!(conv.related[0].value, "INT-001");
    }

    #[test]
    fn content_hash_is_prefixed_sha256() {
        let entry = sample();
        let expected = format!(
            "sha256:{}",
            hasher::hash_str("line one\nline two\nline three\n")
        );
        assert_eq!(entry.content_hash(), Some(expected.as_str()));
    }

    #[test]
    fn json_uses_expected_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["mutation_class"], "INTENT_EVOLUTION");
        assert_eq!(json["vcs"]["revision_id"], "abc123");
        assert_eq!(
            json["files"][0]["conversations"][0]["related"][0]["type"],
            "specification"
        );
        assert_eq!(
            json["files"][0]["conversations"][0]["contributor"]["entity_type"],
            "AI"
        );
    }

    #[test]
    fn line_count_handles_edges() {
        assert_eq!(line_count("single"), 1);
        assert_eq!(line_count("a\nb"), 2);
        assert_eq!(line_count("a\nb\n"), 2);
        assert_eq!(line_count("\n"), 1);
    }

    #[test]
    fn mutation_class_serializes_screaming_snake() {
        let json = serde_json::to_string(&MutationClass::AstRefactor).unwrap();
        assert_eq!(json, "\"AST_REFACTOR\"");
    }
}
