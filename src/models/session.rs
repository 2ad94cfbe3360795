use serde::{Deserialize, Serialize};

use super::run::SessionMemory;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_data: Option<SessionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<SessionMemory>,
    pub last_updated: chrono::DateTime<chrono::Local>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
}

impl SessionRecord {
    pub fn new(session_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
            session_data: None,
            memory: None,
            last_updated: chrono::Local::now(),
        }
    }

    /// Label shown in session listings: the custom name if one was set,
    /// the raw id otherwise.
    pub fn display_name(&self) -> &str {
        self.session_data
            .as_ref()
            .and_then(|d| d.session_name.as_deref())
            .unwrap_or(&self.session_id)
    }
}
