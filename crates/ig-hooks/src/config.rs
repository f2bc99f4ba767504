// config.rs — Gate configuration.
//
// GateConfig pairs the fixed `.orchestration/` file layout with optional
// settings from `.orchestration/gate.toml`. A missing settings file means
// defaults. A broken one also means defaults (plus a warning): the gate
// fails open on configuration, never on authorization.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use ig_audit::MutationClass;
use ig_intent::OrchestrationLayout;
use serde::{Deserialize, Serialize};

use crate::error::GateError;

/// Tunables read from `gate.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSettings {
    /// Hard limit for the revision query.
    pub revision_timeout_ms: u64,

    /// Model recorded when the invocation does not name one.
    pub default_model_identifier: String,

    /// Contributor entity type recorded in trace entries.
    pub contributor_entity_type: String,

    /// Mutation class recorded when the invocation does not name one.
    pub default_mutation_class: MutationClass,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            revision_timeout_ms: ig_vcs::DEFAULT_TIMEOUT.as_millis() as u64,
            default_model_identifier: "unknown-model".to_string(),
            contributor_entity_type: "AI".to_string(),
            default_mutation_class: MutationClass::default(),
        }
    }
}

impl GateSettings {
    pub fn revision_timeout(&self) -> Duration {
        Duration::from_millis(self.revision_timeout_ms)
    }

    /// Read settings, reporting problems. A missing file is not a problem.
    pub fn try_load(path: &Path) -> Result<Self, GateError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(GateError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&text).map_err(|source| GateError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read settings, falling back to defaults on any error.
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring gate settings; using defaults");
            Self::default()
        })
    }
}

/// Everything the hooks need to know about one workspace.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub layout: OrchestrationLayout,
    pub settings: GateSettings,
}

impl GateConfig {
    /// Standard `.orchestration/` layout for a project, with settings loaded
    /// from `gate.toml` when present.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let layout = OrchestrationLayout::for_workspace(project_root);
        let settings = GateSettings::load(&layout.settings);
        Self { layout, settings }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.layout.workspace_root
    }
}
