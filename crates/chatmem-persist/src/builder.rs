use std::sync::Arc;

use crate::dbs::memory::InMemoryLog;
use crate::store::{MemoryStore, DEFAULT_MEMORY_LIMIT};
use crate::trait_log::MessageLog;
use crate::error::Result;

pub struct MemoryStoreBuilder {
    log: Option<Arc<dyn MessageLog>>,
    memory_limit: usize,
    #[cfg(feature = "mongodb")]
    mongodb_uri: Option<String>,
    #[cfg(feature = "mongodb")]
    database: Option<String>,
    #[cfg(feature = "mongodb")]
    collection: String,
}

impl MemoryStoreBuilder {
    pub fn new() -> Self {
        Self {
            log: None,
            memory_limit: DEFAULT_MEMORY_LIMIT,
            #[cfg(feature = "mongodb")]
            mongodb_uri: None,
            #[cfg(feature = "mongodb")]
            database: None,
            #[cfg(feature = "mongodb")]
            collection: crate::dbs::mongo::DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Use an already constructed backend
    pub fn log(mut self, log: Arc<dyn MessageLog>) -> Self {
        self.log = Some(log);
        self
    }

    pub fn memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = limit;
        self
    }

    #[cfg(feature = "mongodb")]
    pub fn mongodb_uri(mut self, uri: impl Into<String>) -> Self {
        self.mongodb_uri = Some(uri.into());
        self
    }

    #[cfg(feature = "mongodb")]
    pub fn database(mut self, db: impl Into<String>) -> Self {
        self.database = Some(db.into());
        self
    }

    #[cfg(feature = "mongodb")]
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Build the store. Without an explicit backend (or MongoDB settings when
    /// the `mongodb` feature is on) an [`InMemoryLog`] is used.
    pub async fn build(mut self) -> Result<MemoryStore> {
        let log = match self.log.take() {
            Some(log) => log,
            None => self.connect_default().await?,
        };

        MemoryStore::with_memory_limit(log, self.memory_limit)
    }

    #[cfg(feature = "mongodb")]
    async fn connect_default(&self) -> Result<Arc<dyn MessageLog>> {
        use crate::error::PersistError;

        let Some(uri) = &self.mongodb_uri else {
            return Ok(Arc::new(InMemoryLog::new()));
        };
        let database = self.database
            .as_deref()
            .ok_or_else(|| PersistError::Internal("database is required".to_string()))?;

        let log = crate::dbs::mongo::MongoMessageLog::connect(uri, database, &self.collection).await?;
        Ok(Arc::new(log))
    }

    #[cfg(not(feature = "mongodb"))]
    async fn connect_default(&self) -> Result<Arc<dyn MessageLog>> {
        Ok(Arc::new(InMemoryLog::new()))
    }
}

impl Default for MemoryStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
