use mongodb::{Client, Collection, IndexModel, bson, bson::doc, bson::Document};
use futures::TryStreamExt;
use async_trait::async_trait;

use crate::dbs::mongo::models::MongoLogEntry;
use crate::models::{LogEntry, NewLogEntry};
use crate::trait_log::MessageLog;
use crate::error::{Result, PersistError};

pub const DEFAULT_COLLECTION: &str = "agent_messages";

/// MongoDB-backed log. Rows are read as raw documents so a malformed row is
/// skipped instead of failing the whole query.
#[derive(Clone)]
pub struct MongoMessageLog {
    collection: Collection<Document>,
}

impl MongoMessageLog {
    /// Connect to MongoDB and open the log collection
    pub async fn connect(mongodb_uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self::new(&client, database, collection))
    }

    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection(collection);
        Self { collection }
    }

    fn decode_rows(documents: Vec<Document>) -> Vec<LogEntry> {
        documents
            .into_iter()
            .filter_map(|document| match bson::from_document::<MongoLogEntry>(document) {
                Ok(row) => Some(row.into()),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed log row");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl MessageLog for MongoMessageLog {
    async fn ensure_ready(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "session_id": 1, "created_at": -1, "_id": -1 })
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn append(&self, entry: NewLogEntry) -> Result<()> {
        let row: MongoLogEntry = entry.into();
        let document = bson::to_document(&row)?;
        self.collection.insert_one(document).await?;
        Ok(())
    }

    async fn recent(&self, session_id: &str, limit: usize) -> Result<Vec<LogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let documents: Vec<Document> = self.collection
            .find(doc! { "session_id": session_id })
            .sort(doc! { "created_at": -1, "_id": -1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?
            .try_collect()
            .await?;

        Ok(Self::decode_rows(documents))
    }

    async fn all(&self, session_id: &str) -> Result<Vec<LogEntry>> {
        let documents: Vec<Document> = self.collection
            .find(doc! { "session_id": session_id })
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(Self::decode_rows(documents))
    }

    async fn count(&self, session_id: &str) -> Result<u64> {
        let filter = doc! { "session_id": session_id };
        Ok(self.collection.count_documents(filter).await?)
    }

    async fn trim_oldest(&self, session_id: &str, keep_count: usize) -> Result<u64> {
        let total = self.count(session_id).await?;
        let keep = keep_count as u64;
        if total <= keep {
            tracing::debug!("No cleanup needed: {} <= {}", total, keep);
            return Ok(0);
        }

        let delete_count = i64::try_from(total - keep).unwrap_or(i64::MAX);
        let oldest: Vec<Document> = self.collection
            .find(doc! { "session_id": session_id })
            .sort(doc! { "created_at": 1, "_id": 1 })
            .projection(doc! { "_id": 1 })
            .limit(delete_count)
            .await?
            .try_collect()
            .await?;

        let ids: Vec<bson::Bson> = oldest
            .into_iter()
            .filter_map(|document| document.get("_id").cloned())
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let result = self.collection
            .delete_many(doc! { "_id": { "$in": ids } })
            .await?;
        Ok(result.deleted_count)
    }
}
