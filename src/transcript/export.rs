use crate::models::Role;

use super::store::TranscriptStore;

/// Serialize a transcript as a markdown document.
pub fn export_transcript(store: &TranscriptStore) -> String {
    let mut doc = String::from("# Finance Agent - Chat History\n\n");

    for msg in store.messages() {
        let label = match msg.role {
            Role::Assistant => "🤖 Assistant",
            Role::User => "👤 User",
        };
        doc.push_str(&format!("### {}\n{}\n\n", label, msg.content));

        if let Some(tool_calls) = &msg.tool_calls {
            if !tool_calls.is_empty() {
                doc.push_str("#### Tools Used:\n");
                for tool in tool_calls {
                    doc.push_str(&format!(
                        "- {}\n",
                        tool.name.as_deref().unwrap_or("Unknown Tool")
                    ));
                }
            }
        }
    }

    doc
}
