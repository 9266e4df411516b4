use serde_json::Value;
use chatmem_types::{Message, Metadata};

pub const DEFAULT_TITLE_MAX_LENGTH: usize = 40;
pub const DEFAULT_TITLE: &str = "New Conversation";
pub const FILES_TITLE: &str = "📎 Conversation with files";

const FILES_PREFIX: &str = "📎 ";
const ELLIPSIS: &str = "...";

/// Title from the first user message with non-blank text.
///
/// User messages seen before that one are checked for file-like metadata, which
/// adds a paperclip prefix (or yields [`FILES_TITLE`] when there is no text at
/// all). Lengths are counted in characters; a longer title is cut to
/// `max_length` and suffixed with `...`.
pub fn generate_title(messages: &[Message], max_length: usize) -> String {
    let mut title: Option<&str> = None;
    let mut has_files = false;

    for message in messages.iter().filter(|m| m.role.is_user()) {
        let content = message.content.trim();
        if !content.is_empty() {
            title = Some(content);
            break;
        }
        if message.metadata.as_ref().is_some_and(has_file_marker) {
            has_files = true;
        }
    }

    let title = match (title, has_files) {
        (Some(text), true) => format!("{}{}", FILES_PREFIX, text),
        (Some(text), false) => text.to_string(),
        (None, true) => FILES_TITLE.to_string(),
        (None, false) => return DEFAULT_TITLE.to_string(),
    };

    truncate(title, max_length)
}

fn has_file_marker(metadata: &Metadata) -> bool {
    metadata.iter().any(|(key, value)| {
        let value = match value {
            Value::String(text) => text.to_lowercase(),
            other => other.to_string().to_lowercase(),
        };
        key.to_lowercase().contains("file") || value.contains("file")
    })
}

fn truncate(title: String, max_length: usize) -> String {
    if title.chars().count() <= max_length {
        return title;
    }
    let mut cut: String = title.chars().take(max_length).collect();
    cut.push_str(ELLIPSIS);
    cut
}
