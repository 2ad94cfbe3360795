use std::collections::HashSet;

use serde_json::Value;

use crate::models::{PersistedRun, Role, RunMessage, ToolCall};

use super::store::TranscriptStore;

/// Rebuild a transcript from a session's persisted run log.
///
/// The store is cleared first, then every run contributes its messages
/// in persisted order. Entries with empty content never appear, system
/// messages never appear, and no two messages with identical
/// (role, content) are appended. The seen-set lives only for the
/// duration of one call.
pub fn rebuild_transcript(store: &mut TranscriptStore, runs: &[PersistedRun]) {
    store.clear();
    let mut seen: HashSet<String> = HashSet::new();

    for run in runs {
        match run {
            PersistedRun::MultiMessage { messages, tools } => {
                for msg in messages {
                    let content = match msg.content.as_deref() {
                        Some(content) if !content.is_empty() => content,
                        _ => continue,
                    };
                    if msg.role == "system" {
                        continue;
                    }
                    let role = match Role::parse(&msg.role) {
                        Some(role) => role,
                        None => continue,
                    };
                    if !seen.insert(format!("{}:{}", role.as_str(), content)) {
                        continue;
                    }

                    let tool_calls = if role == Role::Assistant {
                        assistant_tool_calls(msg, tools.as_deref())
                    } else {
                        None
                    };
                    store.append(role, content, tool_calls, None);
                }
            }
            PersistedRun::SingleExchange {
                message,
                content,
                tools,
            } => {
                // The exchange only counts when the prompt side has
                // content; a reply without its prompt is dropped whole.
                let prompt = match message.content.as_deref() {
                    Some(prompt) if !prompt.is_empty() => prompt,
                    _ => continue,
                };
                if seen.insert(format!("user:{}", prompt)) {
                    store.append(Role::User, prompt, None, None);
                }

                if let Some(reply) = content.as_deref().filter(|c| !c.is_empty()) {
                    if seen.insert(format!("assistant:{}", reply)) {
                        store.append(Role::Assistant, reply, tools.clone(), None);
                    }
                }
            }
            PersistedRun::Unrecognized(_) => {}
        }
    }
}

/// Which tool calls an assistant message carries: an explicit
/// `tool_calls` field wins; failing that, a message with non-null
/// metrics pulls the run-level `tools`. The persisted schema does not
/// document this rule; it mirrors what stored run logs actually
/// contain.
fn assistant_tool_calls(
    msg: &RunMessage,
    run_tools: Option<&[ToolCall]>,
) -> Option<Vec<ToolCall>> {
    match &msg.tool_calls {
        Some(explicit) => explicit.clone(),
        None if metrics_present(&msg.metrics) => run_tools
            .filter(|tools| !tools.is_empty())
            .map(|tools| tools.to_vec()),
        None => None,
    }
}

fn metrics_present(metrics: &Option<Value>) -> bool {
    match metrics {
        None | Some(Value::Null) => false,
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(_)) => true,
    }
}
