//! # ig-intent
//!
//! Intent registry access for Intent Gate.
//!
//! An [`Intent`] is a unit of authorized work declared by humans in
//! `.orchestration/active_intents.yaml`. The gate never writes this file; it
//! re-reads it on every decision so edits take effect on the next tool call.
//!
//! The presence of the registry file is also the opt-in switch for the whole
//! gate (see [`is_enabled`]).
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use ig_intent::{is_enabled, resolve_intent};
//!
//! let root = std::path::Path::new(".");
//! if is_enabled(root) {
//!     let intent = resolve_intent(root, "INT-001").unwrap();
//!     println!("{} covers {:?}", intent.display_name(), intent.owned_scope);
//! }
//! ```

pub mod error;
pub mod intent;
pub mod layout;
pub mod registry;

pub use error::{AvailableIds, IntentError};
pub use intent::Intent;
pub use layout::{is_enabled, OrchestrationLayout, ORCHESTRATION_DIR};
pub use registry::{list_intent_ids, resolve_intent, IntentRegistry, RegistrySnapshot};
