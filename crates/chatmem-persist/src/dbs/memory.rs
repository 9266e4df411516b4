use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{LogEntry, NewLogEntry};
use crate::trait_log::MessageLog;
use crate::error::Result;

/// In-process log, one vector per session kept sorted by `created_at`.
///
/// Entries with equal timestamps stay in insertion order, so the tail of each
/// vector is always the most recent window.
#[derive(Default)]
pub struct InMemoryLog {
    sessions: RwLock<HashMap<String, Vec<LogEntry>>>,
    next_id: AtomicU64,
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageLog for InMemoryLog {
    async fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    async fn append(&self, entry: NewLogEntry) -> Result<()> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let row = LogEntry {
            id: id.to_string(),
            session_id: entry.session_id,
            message_data: entry.message_data,
            created_at: entry.created_at,
        };

        let mut sessions = self.sessions.write().await;
        let rows = sessions.entry(row.session_id.clone()).or_default();
        let position = rows.partition_point(|existing| existing.created_at <= row.created_at);
        rows.insert(position, row);
        Ok(())
    }

    async fn recent(&self, session_id: &str, limit: usize) -> Result<Vec<LogEntry>> {
        let sessions = self.sessions.read().await;
        let rows = sessions
            .get(session_id)
            .map(|rows| rows.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default();
        Ok(rows)
    }

    async fn all(&self, session_id: &str) -> Result<Vec<LogEntry>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned().unwrap_or_default())
    }

    async fn count(&self, session_id: &str) -> Result<u64> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).map_or(0, |rows| rows.len() as u64))
    }

    async fn trim_oldest(&self, session_id: &str, keep_count: usize) -> Result<u64> {
        let mut sessions = self.sessions.write().await;
        let Some(rows) = sessions.get_mut(session_id) else {
            return Ok(0);
        };

        if rows.len() <= keep_count {
            return Ok(0);
        }

        let delete_count = rows.len() - keep_count;
        rows.drain(..delete_count);
        Ok(delete_count as u64)
    }
}
