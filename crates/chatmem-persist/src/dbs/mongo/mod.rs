mod client;
mod models;

pub use client::{MongoMessageLog, DEFAULT_COLLECTION};
pub use models::MongoLogEntry;
