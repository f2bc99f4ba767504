// intent.rs — Intent data model.
//
// An intent is declared in the registry file and is read-only from the
// gate's perspective. Every list field is optional in YAML; a missing list
// deserializes as empty.

use serde::{Deserialize, Serialize};

/// A unit of authorized work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Intent {
    /// Unique, stable identifier (e.g., "INT-001").
    pub id: String,

    /// Human-readable name. May be empty in hand-written registries.
    #[serde(default)]
    pub name: String,

    /// Free-form lifecycle status (e.g., "IN_PROGRESS").
    #[serde(default)]
    pub status: String,

    /// Glob patterns this intent may mutate. Empty means unrestricted.
    #[serde(default)]
    pub owned_scope: Vec<String>,

    /// Free-text rules the agent must follow.
    #[serde(default)]
    pub constraints: Vec<String>,

    /// Free-text conditions that define "done".
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

impl Intent {
    /// Create an intent with only an id and name. Lists start empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: String::new(),
            owned_scope: Vec::new(),
            constraints: Vec::new(),
            acceptance_criteria: Vec::new(),
        }
    }

    /// Set the owned scope and return self.
    pub fn with_scope<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.owned_scope = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// The name to show humans, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Whether this intent restricts which paths it may touch.
    pub fn has_scope(&self) -> bool {
        !self.owned_scope.is_empty()
    }
}
