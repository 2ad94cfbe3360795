use chrono::Local;

use crate::error::{FinchatError, Result};
use crate::models::{PersistedRun, RunMessage, SessionRecord, ToolCall};
use crate::session::SessionStorage;

/// Handle to the finance agent bound to one session.
///
/// Inference, retrieval, and tool execution live in the agent runtime;
/// this handle owns the session record and its persistence.
pub struct FinanceAgent {
    user_id: String,
    record: SessionRecord,
    storage: Box<dyn SessionStorage>,
}

/// Instantiate the finance agent for one user/session pair. Fails when
/// the session exists but belongs to another user, or when storage
/// cannot be read.
pub fn get_finance_agent(
    user_id: &str,
    session_id: &str,
    storage: Box<dyn SessionStorage>,
) -> Result<FinanceAgent> {
    let record = match storage.load_session(session_id)? {
        Some(record) => {
            if record.user_id != user_id {
                return Err(FinchatError::SessionError(format!(
                    "session {} belongs to another user",
                    session_id
                )));
            }
            record
        }
        None => SessionRecord::new(session_id, user_id),
    };

    Ok(FinanceAgent {
        user_id: user_id.to_string(),
        record,
        storage,
    })
}

impl FinanceAgent {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> &str {
        &self.record.session_id
    }

    /// Custom session name, if one was set
    pub fn session_name(&self) -> Option<&str> {
        self.record
            .session_data
            .as_ref()
            .and_then(|d| d.session_name.as_deref())
    }

    /// The persisted run log for this session
    pub fn runs(&self) -> &[PersistedRun] {
        self.record
            .memory
            .as_ref()
            .map(|m| m.runs.as_slice())
            .unwrap_or(&[])
    }

    /// Rename the session and persist the record
    pub fn rename_session(&mut self, new_name: &str) -> Result<()> {
        self.record
            .session_data
            .get_or_insert_with(Default::default)
            .session_name = Some(new_name.to_string());
        self.record.last_updated = Local::now();
        self.storage.save_session(&self.record)
    }

    /// Append one completed exchange to the session's run log and
    /// persist the record.
    pub fn record_run(
        &mut self,
        prompt: &str,
        reply: &str,
        tools: Option<Vec<ToolCall>>,
    ) -> Result<()> {
        let messages = vec![
            RunMessage::user(prompt),
            RunMessage::assistant(reply, tools.clone()),
        ];
        self.record
            .memory
            .get_or_insert_with(Default::default)
            .runs
            .push(PersistedRun::MultiMessage { messages, tools });
        self.record.last_updated = Local::now();
        self.storage.save_session(&self.record)
    }
}
