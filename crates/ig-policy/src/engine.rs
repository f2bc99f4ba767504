// engine.rs — Pre-hook decision engine.
//
// Every tool invocation passes through `decide()`:
//
// 1. Registry file absent? → Allow (gate disabled)
// 2. select_active_intent → intent_id missing? Deny. Unknown? Deny with the
//    known ids. Otherwise Allow + injected intent context.
// 3. Mutating tool →
//    a. no active intent → Deny (Unauthorized)
//    b. no path parameter for this tool → Allow
//    c. active intent declares a scope and the path is outside it → Deny
//    d. whole-file overwrite with known_content_hash that differs from the
//       file on disk → Deny (StaleContent)
// 4. Everything else → Allow
//
// The engine holds no session state. It re-reads the registry and the target
// file on every call, so it never decides on stale data.

use std::path::{Path, PathBuf};

use ig_audit::hasher::{self, FileFingerprint};
use ig_intent::{IntentRegistry, OrchestrationLayout, RegistrySnapshot};

use crate::context::render_intent_context;
use crate::decision::{DecisionResult, DenialKind};
use crate::invocation::InvocationContext;
use crate::scope::{is_in_scope, workspace_relative};
use crate::tools::{Mutation, ToolCall, INTENT_ID_PARAM, SELECT_INTENT_TOOL};

/// Characters of each digest shown in a stale-content message.
const DIGEST_PREVIEW: usize = 8;

/// Pre-hook decision engine for one workspace.
pub struct PreHookEngine {
    layout: OrchestrationLayout,
}

impl PreHookEngine {
    pub fn new(workspace_root: impl AsRef<Path>) -> Self {
        Self::with_layout(OrchestrationLayout::for_workspace(workspace_root))
    }

    pub fn with_layout(layout: OrchestrationLayout) -> Self {
        Self { layout }
    }

    /// Decide whether `ctx` may run. This is the single chokepoint.
    pub fn decide(&self, ctx: &InvocationContext) -> DecisionResult {
        if !self.layout.is_enabled() {
            return DecisionResult::allow();
        }

        let decision = match ToolCall::parse(&ctx.tool_name, &ctx.params) {
            ToolCall::SelectIntent { intent_id } => self.select_intent(intent_id.as_deref()),
            ToolCall::Mutation(mutation) => self.check_mutation(ctx.active_intent(), &mutation),
            ToolCall::Passthrough => DecisionResult::allow(),
        };

        match &decision.denial {
            Some(kind) => tracing::info!(
                tool = %ctx.tool_name,
                denial = ?kind,
                "tool call denied"
            ),
            None => tracing::debug!(tool = %ctx.tool_name, "tool call allowed"),
        }
        decision
    }

    fn registry(&self) -> IntentRegistry {
        IntentRegistry::new(self.layout.registry.clone())
    }

    fn select_intent(&self, intent_id: Option<&str>) -> DecisionResult {
        let intent_id = match intent_id {
            Some(id) => id,
            None => {
                return DecisionResult::deny(
                    DenialKind::ProtocolError,
                    format!(
                        "{} requires a non-empty '{}' parameter.",
                        SELECT_INTENT_TOOL, INTENT_ID_PARAM
                    ),
                )
            }
        };

        let snapshot = self.registry().load();
        if let RegistrySnapshot::Malformed { reason, .. } = &snapshot {
            return DecisionResult::deny(
                DenialKind::ProtocolError,
                format!(
                    "Intent '{}' cannot be selected: {} could not be parsed ({}). \
                     Recovered intent IDs: {}. Fix the registry file, then call {} again.",
                    intent_id,
                    self.registry_display(),
                    reason,
                    recovered_list(snapshot.available_ids().ids()),
                    SELECT_INTENT_TOOL
                ),
            );
        }
        match snapshot.find(intent_id) {
            Some(intent) => {
                tracing::info!(intent = %intent.id, "intent selected");
                DecisionResult::allow_with_context(render_intent_context(intent))
            }
            None => DecisionResult::deny(
                DenialKind::ProtocolError,
                format!(
                    "Intent '{}' not found in {}. Available intent IDs: {}. \
                     Call {} again with one of these IDs.",
                    intent_id,
                    self.registry_display(),
                    snapshot.available_ids(),
                    SELECT_INTENT_TOOL
                ),
            ),
        }
    }

    fn check_mutation(&self, active_intent: Option<&str>, mutation: &Mutation) -> DecisionResult {
        let tool = mutation.tool.name();

        let active_intent = match active_intent {
            Some(id) => id,
            None => {
                let available = self.registry().load().available_ids();
                return DecisionResult::deny(
                    DenialKind::Unauthorized,
                    format!(
                        "No active intent selected. You must call {} before using '{}'. \
                         Available intent IDs: {}.",
                        SELECT_INTENT_TOOL, tool, available
                    ),
                );
            }
        };

        let target = match &mutation.target_path {
            Some(path) => workspace_relative(path, &self.layout.workspace_root),
            None => return DecisionResult::allow(),
        };

        let snapshot = self.registry().load();
        match snapshot.find(active_intent) {
            Some(intent) if intent.has_scope() && !is_in_scope(&target, &intent.owned_scope) => {
                let scope_list = serde_json::to_string(&intent.owned_scope)
                    .unwrap_or_else(|_| intent.owned_scope.join(", "));
                return DecisionResult::deny(
                    DenialKind::OutOfScope,
                    format!(
                        "Scope violation: intent '{}' ({}) is not authorized to modify '{}'. \
                         Allowed scope: {}. Request a scope expansion or select an intent \
                         that owns this path.",
                        intent.id,
                        intent.display_name(),
                        target,
                        scope_list
                    ),
                );
            }
            Some(_) => {}
            None => tracing::warn!(
                intent = %active_intent,
                "active intent not found in registry; scope check skipped"
            ),
        }

        if mutation.tool.is_whole_file_overwrite() {
            if let Some(known) = &mutation.known_content_hash {
                if let Some(denial) = self.check_stale(&target, known) {
                    return denial;
                }
            }
        }

        DecisionResult::allow()
    }

    /// Optimistic-lock check: one compare, no retry.
    fn check_stale(&self, target: &str, known: &str) -> Option<DecisionResult> {
        let disk_path = self.disk_path(target);
        let current = match hasher::hash_file(&disk_path) {
            Ok(FileFingerprint::Present(digest)) => digest,
            Ok(FileFingerprint::Absent) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "could not fingerprint target; stale check skipped");
                return None;
            }
        };

        let known = hasher::normalize_digest(known);
        if known == current {
            return None;
        }
        Some(DecisionResult::deny(
            DenialKind::StaleContent,
            format!(
                "Stale file: '{}' has changed on disk since it was last read \
                 (expected {}..., found {}...). Re-read the file and retry the write \
                 with the new known_content_hash.",
                target,
                hasher::short(&known, DIGEST_PREVIEW),
                hasher::short(&current, DIGEST_PREVIEW)
            ),
        ))
    }

    fn disk_path(&self, target: &str) -> PathBuf {
        let path = Path::new(target);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.layout.workspace_root.join(path)
        }
    }

    fn registry_display(&self) -> String {
        self.layout
            .registry
            .strip_prefix(&self.layout.workspace_root)
            .unwrap_or(&self.layout.registry)
            .display()
            .to_string()
    }
}

fn recovered_list(ids: &[String]) -> String {
    if ids.is_empty() {
        "(none recovered)".to_string()
    } else {
        ids.join(", ")
    }
}

/// Decide one invocation against `workspace_root`.
pub fn decide(ctx: &InvocationContext, workspace_root: &Path) -> DecisionResult {
    PreHookEngine::new(workspace_root).decide(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::DenialKind;
    use ig_audit::hasher::hash_str;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const REGISTRY: &str = r#"active_intents:
  - id: INT-001
    name: Weather API
    status: IN_PROGRESS
    owned_scope:
      - "src/foo/**"
    constraints:
      - "No new dependencies"
    acceptance_criteria:
      - "Tests pass"
  - id: INT-002
    name: Anything goes
    status: IN_PROGRESS
"#;

    fn workspace() -> TempDir {
        let dir = tempdir().unwrap();
        let layout = OrchestrationLayout::for_workspace(dir.path());
        fs::create_dir_all(&layout.orchestration_dir).unwrap();
        fs::write(&layout.registry, REGISTRY).unwrap();
        dir
    }

    fn write(intent: Option<&str>, path: &str) -> InvocationContext {
        let ctx = InvocationContext::new("write_to_file")
            .with_param("path", path)
            .with_param("content", "new content\n");
        match intent {
            Some(id) => ctx.with_active_intent(id),
            None => ctx,
        }
    }

    fn expect_denial(result: &DecisionResult, kind: DenialKind) -> &str {
        assert!(!result.allow, "expected denial, got {:?}", result);
        assert_eq!(result.denial, Some(kind));
        result.error.as_deref().unwrap_or_default()
    }

    #[test]
    fn disabled_gate_allows_everything() {
        let dir = tempdir().unwrap();
        let engine = PreHookEngine::new(dir.path());
        assert_eq!(engine.decide(&write(None, "/etc/passwd")), DecisionResult::allow());
        assert_eq!(
            engine.decide(&InvocationContext::new(SELECT_INTENT_TOOL)),
            DecisionResult::allow()
        );
        assert!(!dir.path().join(".orchestration").exists());
    }

    #[test]
    fn selection_requires_intent_id() {
        let dir = workspace();
        let result = decide(&InvocationContext::new(SELECT_INTENT_TOOL), dir.path());
        let msg = expect_denial(&result, DenialKind::ProtocolError);
        assert!(msg.contains("intent_id"));
    }

    #[test]
    fn selecting_unknown_intent_lists_known_ids() {
        let dir = workspace();
        let ctx = InvocationContext::new(SELECT_INTENT_TOOL).with_param("intent_id", "INT-999");
        let result = decide(&ctx, dir.path());
        let msg = expect_denial(&result, DenialKind::ProtocolError);
        assert!(msg.contains("INT-999"));
        assert!(msg.contains("Available intent IDs: INT-001, INT-002."));
    }

    #[test]
    fn selecting_known_intent_injects_context() {
        let dir = workspace();
        let ctx = InvocationContext::new(SELECT_INTENT_TOOL).with_param("intent_id", "INT-002");
        let result = decide(&ctx, dir.path());
        assert!(result.allow);
        let injected = result.injected_context.unwrap();
        assert!(injected.contains("Any (unrestricted)"));
        assert!(injected.contains("<constraints>\n    None"));
    }

    #[test]
    fn mutation_without_active_intent_is_unauthorized() {
        let dir = workspace();
        for tool in crate::tools::MutatingTool::all() {
            let ctx = InvocationContext::new(tool.name()).with_param("path", "src/foo/a.ts");
            let result = decide(&ctx, dir.path());
            let msg = expect_denial(&result, DenialKind::Unauthorized);
            assert!(msg.contains(SELECT_INTENT_TOOL));
            assert!(msg.contains("INT-001"));
        }
    }

    #[test]
    fn scope_allows_inside_and_denies_outside() {
        let dir = workspace();
        assert!(decide(&write(Some("INT-001"), "src/foo/bar.ts"), dir.path()).allow);

        let result = decide(&write(Some("INT-001"), "src/bar.ts"), dir.path());
        let msg = expect_denial(&result, DenialKind::OutOfScope);
        assert!(msg.contains("INT-001"));
        assert!(msg.contains("src/bar.ts"));
        assert!(msg.contains(r#"["src/foo/**"]"#));
    }

    #[test]
    fn unscoped_intent_allows_any_path() {
        let dir = workspace();
        assert!(decide(&write(Some("INT-002"), "anywhere/at/all.md"), dir.path()).allow);
    }

    #[test]
    fn absolute_path_inside_workspace_is_scoped_relatively() {
        let dir = workspace();
        let abs = dir.path().join("src/foo/x.ts");
        let ctx = write(Some("INT-001"), abs.to_str().unwrap());
        assert!(decide(&ctx, dir.path()).allow);
    }

    #[test]
    fn pathless_tools_skip_scope() {
        let dir = workspace();
        let ctx = InvocationContext::new("execute_command")
            .with_param("command", "rm -rf build")
            .with_active_intent("INT-001");
        assert!(decide(&ctx, dir.path()).allow);
    }

    #[test]
    fn stale_hash_is_a_conflict_and_current_hash_passes() {
        let dir = workspace();
        let file = dir.path().join("src/foo/a.ts");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "version one").unwrap();
        let h1 = hash_str("version one");
        fs::write(&file, "version two").unwrap();
        let h2 = hash_str("version two");

        let stale = write(Some("INT-001"), "src/foo/a.ts").with_param("known_content_hash", h1.clone());
        let result = decide(&stale, dir.path());
        let msg = expect_denial(&result, DenialKind::StaleContent);
        assert!(msg.contains(&h1[..8]));
        assert!(msg.contains(&h2[..8]));
        assert!(msg.contains("Re-read"));

        let fresh = write(Some("INT-001"), "src/foo/a.ts")
            .with_param("known_content_hash", format!("sha256:{}", h2));
        assert!(decide(&fresh, dir.path()).allow);
    }

    #[test]
    fn uppercase_digest_prefix_matches_current_content() {
        let dir = workspace();
        let file = dir.path().join("src/foo/a.ts");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "current").unwrap();

        let known = format!("SHA256:{}", hash_str("current").to_uppercase());
        let ctx = write(Some("INT-001"), "src/foo/a.ts").with_param("known_content_hash", known);
        assert!(decide(&ctx, dir.path()).allow);
    }

    #[test]
    fn known_hash_for_new_file_is_allowed() {
        let dir = workspace();
        let ctx = write(Some("INT-001"), "src/foo/new.ts").with_param("known_content_hash", "deadbeef");
        assert!(decide(&ctx, dir.path()).allow);
    }

    #[test]
    fn unknown_active_intent_skips_scope() {
        let dir = workspace();
        assert!(decide(&write(Some("INT-GONE"), "src/bar.ts"), dir.path()).allow);
    }

    #[test]
    fn malformed_registry_still_decides() {
        let dir = workspace();
        let layout = OrchestrationLayout::for_workspace(dir.path());
        fs::write(&layout.registry, "active_intents:\n  - id: INT-5\n    name: [broken\n").unwrap();

        let ctx = InvocationContext::new(SELECT_INTENT_TOOL).with_param("intent_id", "INT-5");
        let result = decide(&ctx, dir.path());
        let msg = expect_denial(&result, DenialKind::ProtocolError);
        assert!(msg.contains("INT-5"));
        assert!(msg.contains("could not be parsed"));
        assert!(!msg.contains("not found in"));

        let result = decide(&write(None, "a.ts"), dir.path());
        let msg = expect_denial(&result, DenialKind::Unauthorized);
        assert!(msg.contains("INT-5 (registry could not be parsed:"));
    }

    #[test]
    fn wrong_field_type_reports_parse_failure_not_missing_intent() {
        let dir = workspace();
        let layout = OrchestrationLayout::for_workspace(dir.path());
        fs::write(
            &layout.registry,
            "active_intents:\n  - id: INT-001\n    owned_scope: [\"src/foo/**\"]\n    constraints: \"no deps\"\n",
        )
        .unwrap();

        let ctx = InvocationContext::new(SELECT_INTENT_TOOL).with_param("intent_id", "INT-001");
        let result = decide(&ctx, dir.path());
        let msg = expect_denial(&result, DenialKind::ProtocolError);
        assert!(msg.contains(".orchestration/active_intents.yaml could not be parsed"));
        assert!(msg.contains("Recovered intent IDs: INT-001."));
        assert!(msg.contains("Fix the registry file"));
    }

    #[test]
    fn read_only_tools_pass_through() {
        let dir = workspace();
        let ctx = InvocationContext::new("read_file").with_param("path", "/etc/hosts");
        assert!(decide(&ctx, dir.path()).allow);
    }
}
