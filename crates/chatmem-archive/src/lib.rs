//! Conversation archive: stateless operations over a caller-owned list of
//! conversation snapshots.
//!
//! Nothing here performs I/O or keeps state between calls. The host passes
//! its list in, gets the updated list back, and persists it however it likes
//! (for example as JSON via [`snapshots_to_json`]).
//!
//! Snapshots are addressed by their position in the list. A position returned
//! by [`ConversationArchive::save`] shifts as soon as another conversation is
//! inserted, so hosts that keep references across calls should hold the
//! snapshot's stable `id` and re-resolve it with
//! [`ConversationArchive::position_of`].

mod archive;
mod display;
mod record;
mod snapshot;
mod title;

pub use archive::{ConversationArchive, DEFAULT_STORAGE_KEY};
pub use display::{parse_timestamp, DisplayRow};
pub use record::{deserialize, serialize, to_model_messages, MessageRecord, ModelMessage};
pub use snapshot::{snapshots_from_json, snapshots_to_json, Snapshot};
pub use title::{generate_title, DEFAULT_TITLE, DEFAULT_TITLE_MAX_LENGTH, FILES_TITLE};

pub use chatmem_types::{Message, Metadata, Role};
