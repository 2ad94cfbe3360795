mod filesystem;
mod selector;
mod storage;

pub use filesystem::FilesystemSessionStore;
pub use selector::{resolve_selection, session_options, SessionOption};
pub use storage::SessionStorage;

use uuid::Uuid;

/// Mint an id for a fresh session.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}
