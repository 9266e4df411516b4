use async_trait::async_trait;

use crate::models::{LogEntry, NewLogEntry};
use crate::error::Result;

/// Durable keyed append-only log backing the memory store
///
/// Implementations order entries per session by `created_at`, breaking ties
/// by insertion order.
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// Create indexes/tables if missing. Must be idempotent and never drop data.
    async fn ensure_ready(&self) -> Result<()>;

    /// Append a row at the end of the session's log
    async fn append(&self, entry: NewLogEntry) -> Result<()>;

    /// Last `limit` rows for a session, newest first
    async fn recent(&self, session_id: &str, limit: usize) -> Result<Vec<LogEntry>>;

    /// Every row for a session, oldest first
    async fn all(&self, session_id: &str) -> Result<Vec<LogEntry>>;

    /// Number of rows stored for a session
    async fn count(&self, session_id: &str) -> Result<u64>;

    /// Delete the oldest rows so at most `keep_count` remain; returns how many were removed
    async fn trim_oldest(&self, session_id: &str, keep_count: usize) -> Result<u64>;
}
