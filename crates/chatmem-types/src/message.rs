use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Role;

/// Auxiliary annotations attached to a message (tool-call labels, file markers, ...)
pub type Metadata = serde_json::Map<String, Value>;

/// One turn in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,

    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Message {
    pub fn new(role: impl Into<Role>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            metadata: None,
        }
    }

    /// Create user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create tool message
    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(Role::Tool, content)
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Normalize a loosely-shaped JSON record into a `Message`.
    ///
    /// Returns `None` unless the record is an object carrying string `role` and
    /// `content` fields. Extra fields are ignored and a `metadata` value that is
    /// not an object is treated as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let role = object.get("role")?.as_str()?;
        let content = object.get("content")?.as_str()?;
        let metadata = object
            .get("metadata")
            .and_then(Value::as_object)
            .cloned();

        Some(Self {
            role: Role::from(role),
            content: content.to_string(),
            metadata,
        })
    }
}
