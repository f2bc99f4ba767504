// decision.rs — The pre-hook's answer for one tool call.

use serde::{Deserialize, Serialize};

/// Why a call was denied. Each kind maps to a distinct remediation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// The caller broke the protocol (e.g. selection without an id, unknown id).
    ProtocolError,
    /// A mutation was attempted without an active intent.
    Unauthorized,
    /// The target path is outside the active intent's scope.
    OutOfScope,
    /// The file changed on disk since the caller last read it.
    StaleContent,
}

/// Allow/deny plus the message or context to hand back to the agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionResult {
    pub allow: bool,

    /// Actionable, human-readable reason for a denial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Rendered intent context, only on a successful intent selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injected_context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denial: Option<DenialKind>,
}

impl DecisionResult {
    pub fn allow() -> Self {
        Self {
            allow: true,
            error: None,
            injected_context: None,
            denial: None,
        }
    }

    pub fn allow_with_context(context: impl Into<String>) -> Self {
        Self {
            injected_context: Some(context.into()),
            ..Self::allow()
        }
    }

    pub fn deny(kind: DenialKind, error: impl Into<String>) -> Self {
        Self {
            allow: false,
            error: Some(error.into()),
            injected_context: None,
            denial: Some(kind),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allow
    }
}
