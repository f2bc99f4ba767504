//! # ig-audit
//!
//! Provenance records for Intent Gate.
//!
//! After the gate allows a mutating tool call and the tool has run, the
//! post-hook records what happened in two places under `.orchestration/`:
//!
//! - `agent_trace.jsonl` — one [`TraceEntry`] per mutation, appended as a
//!   single JSON line and never rewritten.
//! - `intent_map.md` — a Markdown table mapping files to the intent that last
//!   touched them (see [`IntentMap`]).
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use ig_audit::{hasher, MutationClass, TraceEntry, TraceLog};
//!
//! let content = "fn main() {}\n";
//! let entry = TraceEntry::builder("INT-001", "src/main.rs")
//!     .revision("unknown")
//!     .mutation_class(MutationClass::default())
//!     .session("session-1")
//!     .contributor("AI", "some-model")
//!     .content(content)
//!     .build();
//! TraceLog::new("/tmp/agent_trace.jsonl").append(&entry).unwrap();
//! assert!(entry.files[0].conversations[0].ranges[0].content_hash
//!     .ends_with(&hasher::hash_str(content)));
//! ```

pub mod error;
pub mod hasher;
pub mod intent_map;
pub mod log;
pub mod trace;

pub use error::AuditError;
pub use hasher::FileFingerprint;
pub use intent_map::{IntentMap, IntentMapRow};
pub use log::TraceLog;
pub use trace::{
    Contributor, ContentRange, Conversation, FileTrace, MutationClass, RelatedRef, TraceEntry,
    TraceEntryBuilder, VcsInfo,
};
