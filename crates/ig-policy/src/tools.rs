// tools.rs — Static tool tables and the parsed tool-call union.
//
// Which tools are gated, which parameter holds each tool's target path, and
// which holds its resulting content are all data in `MUTATING_TOOLS`.
// Adding a gated tool means adding a row here; the engine and the post-hook
// both consult this one table.

use serde_json::{Map, Value};

/// The tool an agent calls to bind itself to an intent.
pub const SELECT_INTENT_TOOL: &str = "select_active_intent";

/// Parameter of [`SELECT_INTENT_TOOL`] carrying the requested intent id.
pub const INTENT_ID_PARAM: &str = "intent_id";

/// Optional parameter of whole-file overwrites: the digest of the content the
/// agent last read.
pub const KNOWN_HASH_PARAM: &str = "known_content_hash";

/// Every tool that mutates the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutatingTool {
    WriteToFile,
    ApplyDiff,
    InsertContent,
    SearchAndReplace,
    EditFile,
    ApplyPatch,
    ExecuteCommand,
    NewTask,
}

struct ToolSpec {
    tool: MutatingTool,
    name: &'static str,
    path_param: Option<&'static str>,
    content_param: Option<&'static str>,
    whole_file_overwrite: bool,
}

/// Rows are ordered by [`MutatingTool::index`].
const MUTATING_TOOLS: [ToolSpec; MutatingTool::COUNT] = [
    ToolSpec {
        tool: MutatingTool::WriteToFile,
        name: "write_to_file",
        path_param: Some("path"),
        content_param: Some("content"),
        whole_file_overwrite: true,
    },
    ToolSpec {
        tool: MutatingTool::ApplyDiff,
        name: "apply_diff",
        path_param: Some("path"),
        content_param: Some("diff"),
        whole_file_overwrite: false,
    },
    ToolSpec {
        tool: MutatingTool::InsertContent,
        name: "insert_content",
        path_param: Some("path"),
        content_param: Some("content"),
        whole_file_overwrite: false,
    },
    ToolSpec {
        tool: MutatingTool::SearchAndReplace,
        name: "search_and_replace",
        path_param: Some("path"),
        content_param: Some("replace"),
        whole_file_overwrite: false,
    },
    ToolSpec {
        tool: MutatingTool::EditFile,
        name: "edit_file",
        path_param: Some("file_path"),
        content_param: Some("new_string"),
        whole_file_overwrite: false,
    },
    // Paths are embedded in the patch payload.
    ToolSpec {
        tool: MutatingTool::ApplyPatch,
        name: "apply_patch",
        path_param: None,
        content_param: None,
        whole_file_overwrite: false,
    },
    ToolSpec {
        tool: MutatingTool::ExecuteCommand,
        name: "execute_command",
        path_param: None,
        content_param: None,
        whole_file_overwrite: false,
    },
    ToolSpec {
        tool: MutatingTool::NewTask,
        name: "new_task",
        path_param: None,
        content_param: None,
        whole_file_overwrite: false,
    },
];

static TOOL_ROWS: [ToolSpec; MutatingTool::COUNT] = MUTATING_TOOLS;

// Row order is checked at compile time.
const _: () = {
    let mut i = 0;
    while i < MUTATING_TOOLS.len() {
        assert!(MUTATING_TOOLS[i].tool.index() == i);
        i += 1;
    }
};

impl MutatingTool {
    const COUNT: usize = MutatingTool::NewTask.index() + 1;

    /// Position of this tool's row in `MUTATING_TOOLS`.
    const fn index(self) -> usize {
        match self {
            MutatingTool::WriteToFile => 0,
            MutatingTool::ApplyDiff => 1,
            MutatingTool::InsertContent => 2,
            MutatingTool::SearchAndReplace => 3,
            MutatingTool::EditFile => 4,
            MutatingTool::ApplyPatch => 5,
            MutatingTool::ExecuteCommand => 6,
            MutatingTool::NewTask => 7,
        }
    }

    /// Look up a gated tool by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        TOOL_ROWS.iter().find(|s| s.name == name).map(|s| s.tool)
    }

    /// All gated tools, in table order.
    pub fn all() -> impl Iterator<Item = MutatingTool> {
        TOOL_ROWS.iter().map(|s| s.tool)
    }

    fn row(self) -> &'static ToolSpec {
        &TOOL_ROWS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.row().name
    }

    /// Parameter holding the target file path, if the tool has one.
    pub fn path_param(self) -> Option<&'static str> {
        self.row().path_param
    }

    /// Parameter holding the content recorded by the post-hook.
    pub fn content_param(self) -> Option<&'static str> {
        self.row().content_param
    }

    /// Whether the tool replaces the whole file (subject to the stale check).
    pub fn is_whole_file_overwrite(self) -> bool {
        self.row().whole_file_overwrite
    }
}

/// Whether `tool_name` is subject to gating at all.
pub fn is_gated(tool_name: &str) -> bool {
    tool_name == SELECT_INTENT_TOOL || MutatingTool::from_name(tool_name).is_some()
}

/// A mutating call with its parameters pulled out by the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub tool: MutatingTool,
    pub target_path: Option<String>,
    pub content: Option<String>,
    pub known_content_hash: Option<String>,
}

/// A tool invocation, classified by tool name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    SelectIntent { intent_id: Option<String> },
    Mutation(Mutation),
    Passthrough,
}

impl ToolCall {
    /// Classify a call and extract the parameters the gate cares about.
    /// Non-string or blank parameter values count as absent.
    pub fn parse(tool_name: &str, params: &Map<String, Value>) -> Self {
        if tool_name == SELECT_INTENT_TOOL {
            return ToolCall::SelectIntent {
                intent_id: string_param(params, Some(INTENT_ID_PARAM))
                    .map(|id| id.trim().to_string()),
            };
        }
        match MutatingTool::from_name(tool_name) {
            Some(tool) => ToolCall::Mutation(Mutation {
                tool,
                target_path: string_param(params, tool.path_param()),
                content: content_param(params, tool.content_param()),
                known_content_hash: if tool.is_whole_file_overwrite() {
                    string_param(params, Some(KNOWN_HASH_PARAM))
                } else {
                    None
                },
            }),
            None => ToolCall::Passthrough,
        }
    }
}

fn string_param(params: &Map<String, Value>, key: Option<&str>) -> Option<String> {
    let value = params.get(key?)?.as_str()?;
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Content is taken verbatim; only a truly empty string counts as absent.
fn content_param(params: &Map<String, Value>, key: Option<&str>) -> Option<String> {
    params
        .get(key?)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
