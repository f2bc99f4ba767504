// post_hook.rs — Post-hook audit writer.
//
// Runs only after the tool handler succeeded. Skips silently when there is
// nothing to attribute (gate disabled, no active intent, no path or content
// for this tool). Otherwise it appends one trace entry and upserts one
// intent-map row. Either write may fail; failures are logged and swallowed.

use ig_audit::{IntentMap, IntentMapRow, TraceEntry, TraceLog};
use ig_intent::IntentRegistry;
use ig_policy::{workspace_relative, InvocationContext, ToolCall};

use crate::config::GateConfig;

/// Session id recorded when the invocation does not carry one.
const UNKNOWN_SESSION: &str = "unknown-session";

/// Why the post-hook recorded nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    GateDisabled,
    NoActiveIntent,
    NotAMutation,
    NoTargetPath,
    NoContent,
}

/// What the post-hook did for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum PostHookOutcome {
    Skipped(SkipReason),
    Recorded {
        entry: Box<TraceEntry>,
        trace_written: bool,
        index_written: bool,
    },
}

/// Writes the agent trace and intent map for one workspace.
pub struct AuditWriter {
    config: GateConfig,
}

impl AuditWriter {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// Record provenance for an invocation that already executed.
    pub fn record(&self, ctx: &InvocationContext) -> PostHookOutcome {
        let layout = &self.config.layout;
        if !layout.is_enabled() {
            return PostHookOutcome::Skipped(SkipReason::GateDisabled);
        }
        let intent_id = match ctx.active_intent() {
            Some(id) => id,
            None => return PostHookOutcome::Skipped(SkipReason::NoActiveIntent),
        };
        let mutation = match ToolCall::parse(&ctx.tool_name, &ctx.params) {
            ToolCall::Mutation(m) => m,
            _ => return PostHookOutcome::Skipped(SkipReason::NotAMutation),
        };
        let target = match &mutation.target_path {
            Some(path) => workspace_relative(path, &layout.workspace_root),
            None => return PostHookOutcome::Skipped(SkipReason::NoTargetPath),
        };
        let content = match &mutation.content {
            Some(content) => content,
            None => return PostHookOutcome::Skipped(SkipReason::NoContent),
        };

        let settings = &self.config.settings;
        let revision =
            ig_vcs::detect(&layout.workspace_root, settings.revision_timeout()).current_revision();
        let intent_name = match IntentRegistry::new(layout.registry.clone()).resolve(intent_id) {
            Ok(intent) => intent.display_name().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "intent name unavailable; using id");
                intent_id.to_string()
            }
        };

        let entry = TraceEntry::builder(intent_id, target.clone())
            .revision(revision.as_str())
            .mutation_class(ctx.mutation_class.unwrap_or(settings.default_mutation_class))
            .session(ctx.session_id.as_deref().unwrap_or(UNKNOWN_SESSION))
            .contributor(
                settings.contributor_entity_type.as_str(),
                ctx.model_id
                    .as_deref()
                    .unwrap_or(settings.default_model_identifier.as_str()),
            )
            .content(content.as_str())
            .build();

        let trace_written = match TraceLog::new(layout.trace_log.clone()).append(&entry) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, path = %target, "failed to append agent trace");
                false
            }
        };

        let row = IntentMapRow::new(intent_id, intent_name, target.clone(), entry.timestamp);
        let index_written = match IntentMap::new(layout.intent_map.clone()).upsert(&row) {
            Ok(written) => written,
            Err(e) => {
                tracing::error!(error = %e, path = %target, "failed to update intent map");
                false
            }
        };

        tracing::info!(
            intent = %intent_id,
            path = %target,
            revision = %revision,
            "mutation recorded"
        );
        PostHookOutcome::Recorded {
            entry: Box::new(entry),
            trace_written,
            index_written,
        }
    }
}
