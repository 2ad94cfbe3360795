use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool invocation recorded by the agent runtime.
///
/// Persisted run logs carry tool calls in two wire shapes: plain
/// mappings (`{"name": ..., "args": ...}`) and serialized execution
/// records (`{"tool_name": ..., "tool_args": ...}`). Field aliases
/// collapse both into this one record at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, alias = "tool_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "tool_args", alias = "arguments", skip_serializing_if = "ToolArgs::is_none")]
    pub args: ToolArgs,
    #[serde(default, alias = "content", skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Map<String, Value>>,
}

impl ToolCall {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            args: ToolArgs::None,
            result: None,
            metrics: None,
        }
    }
}

/// Tool arguments as persisted: a mapping, a (possibly JSON-encoded)
/// string, or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolArgs {
    Object(Map<String, Value>),
    Text(String),
    None,
}

impl ToolArgs {
    pub fn is_none(&self) -> bool {
        matches!(self, ToolArgs::None)
    }
}

impl Default for ToolArgs {
    fn default() -> Self {
        ToolArgs::None
    }
}
