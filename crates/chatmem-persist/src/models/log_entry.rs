use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Raw row of the append-only log, backend-agnostic.
///
/// `message_data` is kept as text so a row whose payload no longer parses can
/// still be read, reported, and skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub session_id: String,
    pub message_data: String,
    pub created_at: DateTime<Utc>,
}

/// Row handed to a backend for appending; the backend assigns the id
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub session_id: String,
    pub message_data: String,
    pub created_at: DateTime<Utc>,
}

impl NewLogEntry {
    pub fn new(
        session_id: impl Into<String>,
        message_data: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            message_data: message_data.into(),
            created_at,
        }
    }
}
