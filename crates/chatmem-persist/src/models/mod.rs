mod log_entry;
mod stored_message;
mod summary;

pub use log_entry::{LogEntry, NewLogEntry};
pub use stored_message::StoredMessage;
pub use summary::SessionSummary;
