// invocation.rs — The per-call input handed to both hooks.
//
// Built fresh by the agent runtime for every tool call. The runtime merges a
// call's display parameters with its typed parameters into `params` before
// calling the gate, and carries the active intent binding between calls.
// Field names are snake_case on the wire; camelCase aliases are accepted.

use ig_audit::MutationClass;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvocationContext {
    #[serde(alias = "toolName")]
    pub tool_name: String,

    #[serde(default)]
    pub params: Map<String, Value>,

    /// Intent bound by an earlier successful `select_active_intent`.
    #[serde(default, alias = "activeIntentId")]
    pub active_intent_id: Option<String>,

    /// Change category for the post-hook. `None` uses the configured default.
    #[serde(default, alias = "mutationClass")]
    pub mutation_class: Option<MutationClass>,

    /// Session or task log identifier of the acting agent.
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,

    /// Model identifier of the acting agent.
    #[serde(default, alias = "modelId")]
    pub model_id: Option<String>,
}

impl InvocationContext {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            ..Default::default()
        }
    }

    /// Add one parameter and return self.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_active_intent(mut self, intent_id: impl Into<String>) -> Self {
        self.active_intent_id = Some(intent_id.into());
        self
    }

    pub fn with_mutation_class(mut self, class: MutationClass) -> Self {
        self.mutation_class = Some(class);
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// The bound intent id; blank strings count as no binding.
    pub fn active_intent(&self) -> Option<&str> {
        self.active_intent_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
