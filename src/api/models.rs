use serde::{Deserialize, Serialize};

use crate::models::ToolCall;

#[derive(Serialize)]
pub struct RunRequest {
    pub message: String,
    pub user_id: String,
    pub session_id: String,
    pub stream: bool,
}

/// One server-sent event from the agent runtime. The `event` tag
/// decides which of the optional payload fields is meaningful.
#[derive(Deserialize)]
pub struct RunEvent {
    pub event: String,
    pub content: Option<String>,
    pub tool: Option<ToolCall>,
    pub tools: Option<Vec<ToolCall>>,
}
