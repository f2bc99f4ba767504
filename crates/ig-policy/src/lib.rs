//! # ig-policy
//!
//! The decision half of Intent Gate.
//!
//! Before a mutating tool call runs, [`PreHookEngine::decide`] checks, in order:
//!
//! 1. Is the gate enabled for this workspace? No → Allow.
//! 2. Is this an intent selection? → resolve the intent, inject its context.
//! 3. Is this a mutating tool? → require an active intent, then check the
//!    target path against the intent's scope, then (for whole-file
//!    overwrites) compare the caller's last-known content hash to disk.
//! 4. Anything else → Allow.
//!
//! ## Key invariants
//!
//! - **Fail closed on authorization**: a mutating call without an active
//!   intent is always denied.
//! - **Fail open on configuration**: no registry file means no gate.
//! - **Stateless**: every decision re-reads the registry and the target file.
//!   The active intent is carried by the caller, never stored here.

pub mod context;
pub mod decision;
pub mod engine;
pub mod invocation;
pub mod scope;
pub mod tools;

pub use decision::{DecisionResult, DenialKind};
pub use engine::{decide, PreHookEngine};
pub use invocation::InvocationContext;
pub use scope::{is_in_scope, normalize_path, workspace_relative};
pub use tools::{is_gated, Mutation, MutatingTool, ToolCall, SELECT_INTENT_TOOL};
