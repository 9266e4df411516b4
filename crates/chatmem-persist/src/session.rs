use std::sync::Arc;

use chatmem_types::Message;

use crate::models::{SessionSummary, StoredMessage};
use crate::store::MemoryStore;
use crate::error::Result;

/// A [`MemoryStore`] bound to one conversation
#[derive(Clone)]
pub struct MemorySession {
    session_id: String,
    store: Arc<MemoryStore>,
}

impl MemorySession {
    pub(crate) fn new(session_id: String, store: Arc<MemoryStore>) -> Self {
        Self { session_id, store }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn add_item(&self, message: &Message) -> Result<()> {
        self.store.append(&self.session_id, message).await
    }

    pub async fn add_items(&self, messages: &[Message]) -> Result<()> {
        self.store.append_many(&self.session_id, messages).await
    }

    /// Recent window as plain messages, oldest first
    pub async fn get_items(&self, limit: Option<usize>) -> Result<Vec<Message>> {
        let items = self.store.get_recent(&self.session_id, limit).await?;
        Ok(items.into_iter().map(StoredMessage::into_message).collect())
    }

    pub async fn get_all_items(&self) -> Result<Vec<Message>> {
        let items = self.store.get_all(&self.session_id).await?;
        Ok(items.into_iter().map(StoredMessage::into_message).collect())
    }

    pub async fn summary(&self) -> Result<SessionSummary> {
        self.store.summary(&self.session_id).await
    }

    pub async fn cleanup_old_messages(&self, keep_count: usize) -> Result<u64> {
        self.store.trim_oldest(&self.session_id, keep_count).await
    }
}
