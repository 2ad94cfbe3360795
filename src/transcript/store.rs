use crate::models::{Message, Role, ToolCall};

/// Ordered, append-only log of chat turns for one session.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    messages: Vec<Message>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the log. Always succeeds; messages are
    /// immutable once appended.
    pub fn append(
        &mut self,
        role: Role,
        content: impl Into<String>,
        tool_calls: Option<Vec<ToolCall>>,
        image: Option<String>,
    ) {
        self.messages.push(Message {
            role,
            content: content.into(),
            tool_calls,
            image,
        });
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Per-session UI state: the active session id and its transcript.
///
/// Created once at the entry point and passed down; switching sessions
/// goes through [`ChatContext::reset`] so the transcript can never
/// outlive the session it was built from.
#[derive(Debug)]
pub struct ChatContext {
    pub session_id: String,
    pub transcript: TranscriptStore,
}

impl ChatContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            transcript: TranscriptStore::new(),
        }
    }

    pub fn reset(&mut self, session_id: impl Into<String>) {
        self.session_id = session_id.into();
        self.transcript.clear();
    }
}
