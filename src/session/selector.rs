use crate::models::SessionRecord;

/// One selectable session: the persisted id plus its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOption {
    pub id: String,
    pub display: String,
}

/// Build the selectable options for one user: their sessions only,
/// most recently updated first, labeled with the custom name when one
/// is set and the raw id otherwise.
pub fn session_options(sessions: &[SessionRecord], user_id: &str) -> Vec<SessionOption> {
    let mut user_sessions: Vec<&SessionRecord> = sessions
        .iter()
        .filter(|session| session.user_id == user_id)
        .collect();
    user_sessions.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));

    user_sessions
        .into_iter()
        .map(|session| SessionOption {
            id: session.session_id.clone(),
            display: session.display_name().to_string(),
        })
        .collect()
}

/// Match a `--session` argument against the options, by id first and
/// display label second.
pub fn resolve_selection<'a>(
    options: &'a [SessionOption],
    wanted: &str,
) -> Option<&'a SessionOption> {
    options
        .iter()
        .find(|option| option.id == wanted)
        .or_else(|| options.iter().find(|option| option.display == wanted))
}
