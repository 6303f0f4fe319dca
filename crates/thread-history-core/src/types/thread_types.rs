//! Thread records and their list summaries

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A conversation thread as held by the backing store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredThread {
    pub id: String,
    /// Free-form state payload; a `messages` array is used for previews
    pub values: Option<Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl StoredThread {
    /// Create a thread with a fresh id
    pub fn new(values: Option<Value>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), values)
    }

    pub fn with_id(id: impl Into<String>, values: Option<Value>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: id.into(),
            values,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a thread whose first message is a user text message
    pub fn from_first_message(text: impl Into<String>) -> Self {
        Self::new(Some(serde_json::json!({
            "messages": [{ "type": "human", "content": text.into() }]
        })))
    }
}

/// One list row's worth of data, immutable from the panel's point of view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    pub id: String,
    pub preview_text: String,
}

impl ThreadSummary {
    pub fn new(id: impl Into<String>, preview_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            preview_text: preview_text.into(),
        }
    }
}

impl From<&StoredThread> for ThreadSummary {
    fn from(thread: &StoredThread) -> Self {
        Self {
            id: thread.id.clone(),
            preview_text: derive_preview(thread),
        }
    }
}

/// Preview text for a thread: the first message's content, or the id when
/// there is no first message. A first message without content previews as
/// an empty string.
pub fn derive_preview(thread: &StoredThread) -> String {
    thread
        .values
        .as_ref()
        .and_then(|values| values.get("messages"))
        .and_then(Value::as_array)
        .and_then(|messages| messages.first())
        .map(|first| first.get("content").map(content_string).unwrap_or_default())
        .unwrap_or_else(|| thread.id.clone())
}

/// Flatten message content to plain text.
///
/// A string is returned as is; an array of content blocks yields the `text`
/// of every `{"type": "text"}` block joined by a single space. Anything else
/// flattens to an empty string.
pub fn content_string(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}
