use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::storage::SessionStorage;
use crate::error::Result;
use crate::models::SessionRecord;

pub struct FilesystemSessionStore;

impl FilesystemSessionStore {
    pub fn new() -> Self {
        Self
    }

    fn sessions_dir(&self) -> PathBuf {
        let home = env::var("HOME").expect("HOME environment variable not set");
        let sessions_dir = Path::new(&home)
            .join(".local")
            .join("share")
            .join("finchat")
            .join("sessions");
        if !sessions_dir.exists() {
            fs::create_dir_all(&sessions_dir).expect("Failed to create sessions directory");
        }
        sessions_dir
    }

    fn session_file(&self, session_id: &str) -> PathBuf {
        self.sessions_dir()
            .join(format!("session-{}.json", session_id))
    }
}

impl SessionStorage for FilesystemSessionStore {
    fn get_all_sessions(&self) -> Result<Vec<SessionRecord>> {
        let sessions_dir = self.sessions_dir();
        let mut sessions: Vec<SessionRecord> = Vec::new();

        // Unreadable or unparseable files are skipped, not fatal
        if let Ok(entries) = fs::read_dir(&sessions_dir) {
            sessions = entries
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| {
                    let path = entry.path();
                    if path.extension()? == "json"
                        && path.file_name()?.to_str()?.starts_with("session-")
                    {
                        let content = fs::read_to_string(&path).ok()?;
                        serde_json::from_str::<SessionRecord>(&content).ok()
                    } else {
                        None
                    }
                })
                .collect();
        }

        // Most recently updated first
        sessions.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(sessions)
    }

    fn load_session(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        let path = self.session_file(session_id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let record: SessionRecord = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    fn save_session(&self, record: &SessionRecord) -> Result<()> {
        let path = self.session_file(&record.session_id);
        let content = serde_json::to_string_pretty(record)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn clear_all_sessions(&self) -> Result<()> {
        let sessions_dir = self.sessions_dir();
        if let Ok(entries) = fs::read_dir(&sessions_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.extension() == Some(std::ffi::OsStr::new("json"))
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with("session-"))
                {
                    fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for FilesystemSessionStore {
    fn default() -> Self {
        Self::new()
    }
}
