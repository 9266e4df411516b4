pub mod models;
pub mod dbs;
pub mod error;
pub mod builder;
mod trait_log;
mod store;
mod session;

pub use models::{LogEntry, NewLogEntry, StoredMessage, SessionSummary};
pub use trait_log::MessageLog;
pub use dbs::memory::InMemoryLog;
pub use store::{MemoryStore, DEFAULT_MEMORY_LIMIT, DEFAULT_KEEP_COUNT};
pub use session::MemorySession;
pub use error::{PersistError, Result};
pub use builder::MemoryStoreBuilder;

#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoMessageLog;

pub use chatmem_types::{Message, Metadata, Role};
