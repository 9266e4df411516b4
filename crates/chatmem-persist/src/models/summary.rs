use serde::{Deserialize, Serialize};

/// Statistics about one session's log relative to the memory window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub total_items: u64,
    pub recent_items: usize,
    pub memory_limit: usize,
    pub has_more_history: bool,
}
