//! # Chatmem
//!
//! Bounded conversational memory for chat applications.
//!
//! ## Overview
//!
//! Two independent pieces share one `Message` type:
//!
//! - **Windowed memory store** (`chatmem-persist`): an append-only log per
//!   session with a bounded, chronologically ordered read window. Corrupted
//!   rows are skipped and logged instead of failing the read.
//! - **Conversation archive** (`chatmem-archive`): pure save/load/list/delete
//!   over a list of whole-conversation snapshots that the host owns and
//!   persists.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatmem::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PersistError> {
//!     let store = Arc::new(MemoryStore::builder().memory_limit(10).build().await?);
//!     let session = store.session("conversation-123");
//!
//!     session.add_item(&Message::user("Hello!")).await?;
//!     session.add_item(&Message::assistant("Hi, how can I help?")).await?;
//!     let window = session.get_items(None).await?;
//!
//!     let archive = ConversationArchive::new();
//!     let (id, snapshots) = archive.save(None, &window, Vec::new());
//!     for row in archive.list_for_display(&snapshots) {
//!         println!("{}", row.text);
//!     }
//!     assert_eq!(id, Some(0));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `mongodb`: enables `MongoMessageLog`, a MongoDB-backed log.
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use chatmem_types::{Message, Metadata, Role};

pub use chatmem_persist::{
    InMemoryLog, LogEntry, MemorySession, MemoryStore, MemoryStoreBuilder, MessageLog,
    NewLogEntry, PersistError, SessionSummary, StoredMessage, DEFAULT_KEEP_COUNT,
    DEFAULT_MEMORY_LIMIT,
};

#[cfg(feature = "mongodb")]
pub use chatmem_persist::MongoMessageLog;

pub use chatmem_archive::{
    deserialize, generate_title, serialize, snapshots_from_json, snapshots_to_json,
    to_model_messages, ConversationArchive, DisplayRow, MessageRecord, ModelMessage, Snapshot,
};
