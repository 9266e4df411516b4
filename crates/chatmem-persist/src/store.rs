use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use chatmem_types::Message;

use crate::builder::MemoryStoreBuilder;
use crate::models::{LogEntry, NewLogEntry, SessionSummary, StoredMessage};
use crate::session::MemorySession;
use crate::trait_log::MessageLog;
use crate::error::{Result, PersistError};

/// Window size used when a caller does not pass an explicit limit
pub const DEFAULT_MEMORY_LIMIT: usize = 10;

/// Rows kept by [`MemoryStore::trim_oldest`] when callers have no better number
pub const DEFAULT_KEEP_COUNT: usize = 50;

/// Windowed memory store over an append-only [`MessageLog`].
///
/// The full history of every session stays in the log; bounding happens only
/// when reading. Stored rows that fail to parse are skipped and reported via
/// `tracing`, so one bad row never hides the rest of a conversation.
pub struct MemoryStore {
    log: Arc<dyn MessageLog>,
    memory_limit: AtomicUsize,
    clock: StoreClock,
    ready: OnceCell<()>,
}

impl MemoryStore {
    pub fn new(log: Arc<dyn MessageLog>) -> Self {
        Self {
            log,
            memory_limit: AtomicUsize::new(DEFAULT_MEMORY_LIMIT),
            clock: StoreClock::default(),
            ready: OnceCell::new(),
        }
    }

    pub fn with_memory_limit(log: Arc<dyn MessageLog>, memory_limit: usize) -> Result<Self> {
        let store = Self::new(log);
        store.set_memory_limit(memory_limit)?;
        Ok(store)
    }

    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::new()
    }

    pub fn memory_limit(&self) -> usize {
        self.memory_limit.load(Ordering::Relaxed)
    }

    pub fn set_memory_limit(&self, new_limit: usize) -> Result<()> {
        if new_limit == 0 {
            return Err(PersistError::InvalidMemoryLimit(new_limit));
        }

        let old_limit = self.memory_limit.swap(new_limit, Ordering::Relaxed);
        if old_limit != new_limit {
            tracing::info!("Memory limit updated from {} to {}", old_limit, new_limit);
        }
        Ok(())
    }

    /// Bind a handle to one session
    pub fn session(self: &Arc<Self>, session_id: impl Into<String>) -> MemorySession {
        let session_id = session_id.into();
        tracing::info!(session_id = %session_id, "Memory session created/retrieved");
        MemorySession::new(session_id, Arc::clone(self))
    }

    /// Prepare the backing log. Runs the backend initialization at most once
    /// per store; later calls return immediately.
    pub async fn ensure_ready(&self, session_id: &str) -> Result<()> {
        self.ready
            .get_or_try_init(|| async {
                tracing::debug!(session_id, "Initializing message log");
                self.log.ensure_ready().await
            })
            .await?;
        Ok(())
    }

    /// Append a message to the end of the session's log
    pub async fn append(&self, session_id: &str, message: &Message) -> Result<()> {
        self.ensure_ready(session_id).await?;

        let message_data = serde_json::to_string(message)?;
        let entry = NewLogEntry::new(session_id, message_data, self.clock.now());
        self.log.append(entry).await
    }

    /// Append several messages in order. Stops at the first failure; earlier
    /// messages stay appended.
    pub async fn append_many(&self, session_id: &str, messages: &[Message]) -> Result<()> {
        for message in messages {
            self.append(session_id, message).await?;
        }
        Ok(())
    }

    /// Up to `limit` most recent messages (store default when `None`), oldest first
    pub async fn get_recent(
        &self,
        session_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<StoredMessage>> {
        let effective_limit = limit.unwrap_or_else(|| self.memory_limit());
        tracing::debug!(
            session_id,
            "Getting {} recent conversation items in chronological order",
            effective_limit
        );

        self.ensure_ready(session_id).await?;

        let mut rows = self.log.recent(session_id, effective_limit).await?;
        rows.reverse();

        let items = decode_rows(session_id, rows);
        tracing::debug!(session_id, "Retrieved {} conversation items", items.len());
        Ok(items)
    }

    /// Entire history, oldest first, with the same skip-on-corruption policy
    pub async fn get_all(&self, session_id: &str) -> Result<Vec<StoredMessage>> {
        tracing::debug!(session_id, "Getting all conversation items (no limit)");
        self.ensure_ready(session_id).await?;

        let rows = self.log.all(session_id).await?;
        let items = decode_rows(session_id, rows);
        tracing::debug!(session_id, "Retrieved {} total conversation items", items.len());
        Ok(items)
    }

    /// Number of stored rows, corrupted ones included
    pub async fn count(&self, session_id: &str) -> Result<u64> {
        self.ensure_ready(session_id).await?;
        self.log.count(session_id).await
    }

    pub async fn summary(&self, session_id: &str) -> Result<SessionSummary> {
        let total_items = self.count(session_id).await?;
        let recent_items = self.get_recent(session_id, None).await?.len();
        let memory_limit = self.memory_limit();

        Ok(SessionSummary {
            session_id: session_id.to_string(),
            total_items,
            recent_items,
            memory_limit,
            has_more_history: total_items > memory_limit as u64,
        })
    }

    /// Delete the oldest rows beyond `keep_count`, returning how many were removed.
    /// The memory limit is unaffected.
    pub async fn trim_oldest(&self, session_id: &str, keep_count: usize) -> Result<u64> {
        self.ensure_ready(session_id).await?;

        let removed = self.log.trim_oldest(session_id, keep_count).await?;
        if removed > 0 {
            tracing::info!(session_id, "Cleaned up {} old messages", removed);
        }
        Ok(removed)
    }
}

fn decode_rows(session_id: &str, rows: Vec<LogEntry>) -> Vec<StoredMessage> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_str::<Message>(&row.message_data) {
            Ok(message) => Some(StoredMessage {
                id: row.id,
                created_at: row.created_at,
                message,
            }),
            Err(e) => {
                tracing::warn!(
                    session_id,
                    entry_id = %row.id,
                    error = %e,
                    "Skipping corrupted message"
                );
                None
            }
        })
        .collect()
}

/// Wall clock that never runs backwards within one store
#[derive(Default)]
struct StoreClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl StoreClock {
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let stamped = match *last {
            Some(previous) if previous > now => previous,
            _ => now,
        };
        *last = Some(stamped);
        stamped
    }
}
