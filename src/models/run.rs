use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::tool::ToolCall;

/// One persisted interaction unit in a session's run log.
///
/// Two legacy formats coexist: a run holding a flat message list, and a
/// run holding a single prompt/reply exchange. The variant is resolved
/// once when the session record is loaded; anything else falls through
/// to `Unrecognized` and contributes nothing to the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersistedRun {
    MultiMessage {
        messages: Vec<RunMessage>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tools: Option<Vec<ToolCall>>,
    },
    SingleExchange {
        message: RunPrompt,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tools: Option<Vec<ToolCall>>,
    },
    Unrecognized(Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    // Outer None = field absent, inner None = explicit null. The
    // metrics fallback in reconstruction applies only when the field
    // is absent, so the two must stay distinguishable.
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Option<Vec<ToolCall>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Value>,
}

impl RunMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            metrics: None,
        }
    }

    pub fn assistant(content: impl Into<String>, tool_calls: Option<Vec<ToolCall>>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: Some(content.into()),
            tool_calls: tool_calls.map(Some),
            metrics: None,
        }
    }
}

/// The user side of a single-exchange run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPrompt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionMemory {
    #[serde(default)]
    pub runs: Vec<PersistedRun>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
