use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use chatmem_types::Message;

/// A message read back from the log together with its store-assigned timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub message: Message,
}

impl StoredMessage {
    pub fn into_message(self) -> Message {
        self.message
    }
}

impl From<StoredMessage> for Message {
    fn from(stored: StoredMessage) -> Self {
        stored.message
    }
}
