use chrono::{DateTime, Local, NaiveDateTime};
use chatmem_types::Message;

use crate::display::{format_row, parse_timestamp, DisplayRow};
use crate::record::{deserialize, serialize, MessageRecord};
use crate::snapshot::Snapshot;
use crate::title::{generate_title, DEFAULT_TITLE_MAX_LENGTH};

pub const DEFAULT_STORAGE_KEY: &str = "chat_conversations";

/// Save/load/list/delete over a caller-owned snapshot list.
///
/// Holds only settings. Each operation takes the list by value (or slice) and
/// hands the result back, never keeping a reference.
#[derive(Debug, Clone)]
pub struct ConversationArchive {
    storage_key: String,
    title_max_length: usize,
}

impl ConversationArchive {
    pub fn new() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            title_max_length: DEFAULT_TITLE_MAX_LENGTH,
        }
    }

    /// Key under which hosts are expected to persist the list
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn with_title_max_length(mut self, max_length: usize) -> Self {
        self.title_max_length = max_length;
        self
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn title_max_length(&self) -> usize {
        self.title_max_length
    }

    /// Sentinel "no active conversation" pair
    pub fn new_conversation() -> (Option<usize>, Vec<Message>) {
        (None, Vec::new())
    }

    pub fn save(
        &self,
        conversation_id: Option<usize>,
        messages: &[Message],
        snapshots: Vec<Snapshot>,
    ) -> (Option<usize>, Vec<Snapshot>) {
        self.save_at(conversation_id, messages, snapshots, Local::now())
    }

    /// [`save`](Self::save) with an explicit clock reading.
    ///
    /// An empty `messages` returns the inputs untouched. A `conversation_id`
    /// pointing inside the list overwrites that slot; anything else inserts at
    /// the front and returns `Some(0)`.
    pub fn save_at(
        &self,
        conversation_id: Option<usize>,
        messages: &[Message],
        mut snapshots: Vec<Snapshot>,
        now: DateTime<Local>,
    ) -> (Option<usize>, Vec<Snapshot>) {
        if messages.is_empty() {
            return (conversation_id, snapshots);
        }

        let mut snapshot = Snapshot {
            id: None,
            title: Some(generate_title(messages, self.title_max_length)),
            messages: serialize(messages)
                .into_iter()
                .map(MessageRecord::into_value)
                .collect(),
            timestamp: Some(now.to_rfc3339()),
            message_count: i64::try_from(messages.len()).unwrap_or(i64::MAX),
        };

        match conversation_id {
            Some(index) if index < snapshots.len() => {
                let slot = &mut snapshots[index];
                snapshot.id = slot.id.take().or_else(new_snapshot_id);
                *slot = snapshot;
                tracing::debug!(index, "Updated saved conversation");
                (Some(index), snapshots)
            }
            _ => {
                snapshot.id = new_snapshot_id();
                snapshots.insert(0, snapshot);
                tracing::debug!(total = snapshots.len(), "Saved new conversation");
                (Some(0), snapshots)
            }
        }
    }

    /// Messages of the snapshot at `index`; out of range yields `(None, [])`
    pub fn load(&self, index: usize, snapshots: &[Snapshot]) -> (Option<usize>, Vec<Message>) {
        match snapshots.get(index) {
            Some(snapshot) => (Some(index), deserialize(&snapshot.messages)),
            None => Self::new_conversation(),
        }
    }

    /// Remove the snapshot at `conversation_id`; out of range leaves the list as is
    pub fn delete(
        &self,
        conversation_id: Option<usize>,
        mut snapshots: Vec<Snapshot>,
    ) -> (Option<usize>, Vec<Snapshot>) {
        if let Some(index) = conversation_id.filter(|&index| index < snapshots.len()) {
            snapshots.remove(index);
            tracing::debug!(index, "Deleted saved conversation");
        }
        (None, snapshots)
    }

    /// Every snapshot, newest first, rendered for a picker.
    ///
    /// Missing or unparseable timestamps sort after all parseable ones. Equal
    /// timestamps keep list order.
    pub fn list_for_display(&self, snapshots: &[Snapshot]) -> Vec<DisplayRow> {
        let mut ordered: Vec<(usize, Option<NaiveDateTime>, &Snapshot)> = snapshots
            .iter()
            .enumerate()
            .map(|(index, snapshot)| {
                let time = snapshot.timestamp.as_deref().and_then(parse_timestamp);
                (index, time, snapshot)
            })
            .collect();

        ordered.sort_by(|a, b| b.1.cmp(&a.1));

        ordered
            .into_iter()
            .enumerate()
            .map(|(position, (index, time, snapshot))| {
                let title = snapshot
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Conversation {}", position + 1));
                DisplayRow {
                    index,
                    text: format_row(&title, time, snapshot.message_count),
                }
            })
            .collect()
    }

    /// Current position of the snapshot with the given stable id
    pub fn position_of(&self, id: &str, snapshots: &[Snapshot]) -> Option<usize> {
        snapshots
            .iter()
            .position(|snapshot| snapshot.id.as_deref() == Some(id))
    }
}

impl Default for ConversationArchive {
    fn default() -> Self {
        Self::new()
    }
}

fn new_snapshot_id() -> Option<String> {
    Some(uuid::Uuid::new_v4().to_string())
}
