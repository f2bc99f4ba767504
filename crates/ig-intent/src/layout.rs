// layout.rs — Fixed file layout under `.orchestration/` and the opt-in check.
//
// The gate is enabled for a workspace exactly when the registry file exists.
// Both hooks call `is_enabled()` independently on every invocation, so
// creating or deleting the registry takes effect on the next call.

use std::path::{Path, PathBuf};

/// Subdirectory of the workspace root that holds every gate file.
pub const ORCHESTRATION_DIR: &str = ".orchestration";

/// Registry file name (YAML).
pub const REGISTRY_FILE: &str = "active_intents.yaml";

/// Audit log file name (JSON Lines).
pub const TRACE_FILE: &str = "agent_trace.jsonl";

/// Spatial index file name (Markdown table).
pub const INTENT_MAP_FILE: &str = "intent_map.md";

/// Optional settings file name (TOML).
pub const SETTINGS_FILE: &str = "gate.toml";

/// Resolved paths of every gate file for one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationLayout {
    pub workspace_root: PathBuf,
    pub orchestration_dir: PathBuf,
    pub registry: PathBuf,
    pub trace_log: PathBuf,
    pub intent_map: PathBuf,
    pub settings: PathBuf,
}

impl OrchestrationLayout {
    /// Compute the standard `.orchestration/` layout for a workspace.
    pub fn for_workspace(workspace_root: impl AsRef<Path>) -> Self {
        let root = workspace_root.as_ref().to_path_buf();
        let dir = root.join(ORCHESTRATION_DIR);
        Self {
            registry: dir.join(REGISTRY_FILE),
            trace_log: dir.join(TRACE_FILE),
            intent_map: dir.join(INTENT_MAP_FILE),
            settings: dir.join(SETTINGS_FILE),
            orchestration_dir: dir,
            workspace_root: root,
        }
    }

    /// Whether the registry file is present (see [`is_enabled`]).
    pub fn is_enabled(&self) -> bool {
        // Any metadata error (missing, permission denied) means "disabled".
        std::fs::metadata(&self.registry)
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}

/// Check whether the gate is active for `workspace_root`.
///
/// Never fails: I/O errors are treated as "disabled".
pub fn is_enabled(workspace_root: &Path) -> bool {
    OrchestrationLayout::for_workspace(workspace_root).is_enabled()
}
