use crate::error::Result;
use crate::models::SessionRecord;

/// Trait for session storage backends
pub trait SessionStorage: Send + Sync {
    /// List every persisted session, across all users
    fn get_all_sessions(&self) -> Result<Vec<SessionRecord>>;

    /// Load one session by id
    fn load_session(&self, session_id: &str) -> Result<Option<SessionRecord>>;

    /// Save a session
    fn save_session(&self, record: &SessionRecord) -> Result<()>;

    /// Clear all sessions
    fn clear_all_sessions(&self) -> Result<()>;
}
