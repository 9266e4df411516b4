use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::models::{LogEntry, NewLogEntry};

/// MongoDB-specific log row (uses ObjectId, stores `created_at` as a BSON date)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoLogEntry {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub session_id: String,
    pub message_data: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl From<NewLogEntry> for MongoLogEntry {
    fn from(entry: NewLogEntry) -> Self {
        Self {
            id: ObjectId::new(),
            session_id: entry.session_id,
            message_data: entry.message_data,
            created_at: entry.created_at,
        }
    }
}

impl From<MongoLogEntry> for LogEntry {
    fn from(entry: MongoLogEntry) -> Self {
        Self {
            id: entry.id.to_hex(),
            session_id: entry.session_id,
            message_data: entry.message_data,
            created_at: entry.created_at,
        }
    }
}
