//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use chatmem::prelude::*;
//! ```

pub use crate::{
    Message, Metadata, Role,
    MemoryStore, MemoryStoreBuilder, MemorySession, MessageLog, InMemoryLog,
    StoredMessage, PersistError,
    ConversationArchive, Snapshot, DisplayRow, ModelMessage,
};
