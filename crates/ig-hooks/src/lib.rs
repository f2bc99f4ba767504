//! # ig-hooks
//!
//! Entry points the agent runtime calls around every tool invocation.
//!
//! ```text
//! runtime ──► run_pre_hook ──allow?──► tool handler ──ok──► run_post_hook
//!                 │                                              │
//!                 └─ deny: error goes back to the agent          └─ trace + intent map
//! ```
//!
//! The runtime owns the active-intent binding and passes it in each
//! [`InvocationContext`]; nothing here keeps state between calls.

pub mod config;
pub mod error;
pub mod post_hook;

use std::path::Path;

pub use config::{GateConfig, GateSettings};
pub use error::GateError;
pub use post_hook::{AuditWriter, PostHookOutcome, SkipReason};

pub use ig_audit::MutationClass;
pub use ig_policy::{DecisionResult, DenialKind, InvocationContext};

/// Decide whether the invocation may run.
pub fn run_pre_hook(ctx: &InvocationContext, workspace_root: &Path) -> DecisionResult {
    ig_policy::decide(ctx, workspace_root)
}

/// Record provenance for an invocation whose tool already ran successfully.
///
/// Never fails: bookkeeping problems are logged and swallowed.
pub fn run_post_hook(ctx: &InvocationContext, workspace_root: &Path) {
    let outcome = AuditWriter::new(GateConfig::for_project(workspace_root)).record(ctx);
    tracing::debug!(?outcome, tool = %ctx.tool_name, "post-hook finished");
}

/// Parse an invocation context from JSON (as sent by a hook runner).
pub fn parse_invocation(json: &str) -> Result<InvocationContext, GateError> {
    Ok(serde_json::from_str(json)?)
}
