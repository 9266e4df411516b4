use serde::{Deserialize, Serialize};
use serde_json::Value;
use chatmem_types::{Message, Metadata};

/// Plain `{role, content, metadata}` record as stored inside a snapshot.
/// `metadata` is written as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl MessageRecord {
    pub fn into_value(self) -> Value {
        let mut object = serde_json::Map::new();
        object.insert("role".to_string(), Value::String(self.role));
        object.insert("content".to_string(), Value::String(self.content));
        object.insert(
            "metadata".to_string(),
            self.metadata.map_or(Value::Null, Value::Object),
        );
        Value::Object(object)
    }
}

impl From<&Message> for MessageRecord {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.to_string(),
            content: message.content.clone(),
            metadata: message.metadata.clone(),
        }
    }
}

/// `{role, content}` pair handed to a downstream model call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMessage {
    pub role: String,
    pub content: String,
}

pub fn serialize(messages: &[Message]) -> Vec<MessageRecord> {
    messages.iter().map(MessageRecord::from).collect()
}

/// Rebuild messages from stored records. Records without a string `role` and
/// `content` are dropped; unknown fields are ignored.
pub fn deserialize(records: &[Value]) -> Vec<Message> {
    records.iter().filter_map(Message::from_value).collect()
}

pub fn to_model_messages(messages: &[Message]) -> Vec<ModelMessage> {
    messages
        .iter()
        .map(|message| ModelMessage {
            role: message.role.to_string(),
            content: message.content.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_value_has_null_metadata() {
        let value = MessageRecord::from(&Message::user("hi")).into_value();
        assert_eq!(value, json!({"role": "user", "content": "hi", "metadata": null}));
    }

    #[test]
    fn test_deserialize_drops_incomplete_records() {
        let records = vec![
            json!({"role": "user", "content": "kept"}),
            json!({"role": "assistant"}),
            json!({"content": "no role"}),
            json!(42),
            json!({"role": "assistant", "content": "also kept", "unknown": true}),
        ];

        let messages = deserialize(&records);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "also kept");
    }

    #[test]
    fn test_to_model_messages_drops_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!("tool"));
        let messages = vec![Message::assistant("done").with_metadata(metadata)];

        assert_eq!(
            to_model_messages(&messages),
            vec![ModelMessage { role: "assistant".to_string(), content: "done".to_string() }]
        );
    }
}
