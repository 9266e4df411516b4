use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Saved copy of a whole conversation plus display metadata.
///
/// Every field decodes leniently: a missing field or one with the wrong JSON
/// type falls back to its default instead of rejecting the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient_records")]
    pub messages: Vec<Value>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub message_count: i64,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(records) => Ok(records),
        _ => Ok(Vec::new()),
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = value
        .as_i64()
        .or_else(|| value.as_u64().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
        .or_else(|| value.as_f64().map(|n| n as i64))
        .unwrap_or(0);
    Ok(count)
}

/// Decode a stored snapshot list. Entries that are not JSON objects are
/// skipped; text that is not a JSON array yields an empty list.
pub fn snapshots_from_json(raw: &str) -> Vec<Snapshot> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            tracing::warn!("Stored conversation list is not an array, starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse stored conversation list, starting empty");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            if !entry.is_object() {
                tracing::warn!(position, "Skipping stored conversation that is not an object");
                return None;
            }
            match serde_json::from_value::<Snapshot>(entry) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    tracing::warn!(position, error = %e, "Skipping undecodable stored conversation");
                    None
                }
            }
        })
        .collect()
}

pub fn snapshots_to_json(snapshots: &[Snapshot]) -> serde_json::Result<String> {
    serde_json::to_string(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "title": 12,
            "messages": "not a list",
            "timestamp": null,
            "message_count": "three",
        }))
        .unwrap();

        assert_eq!(snapshot.title, None);
        assert!(snapshot.messages.is_empty());
        assert_eq!(snapshot.timestamp, None);
        assert_eq!(snapshot.message_count, 0);
    }

    #[test]
    fn test_empty_object_is_a_snapshot() {
        let snapshot: Snapshot = serde_json::from_value(json!({})).unwrap();
        assert_eq!(snapshot.message_count, 0);
        assert!(snapshot.id.is_none());
    }

    #[test]
    fn test_from_json_skips_non_objects() {
        let raw = r#"[{"title": "a", "message_count": 2}, 5, "x", {"title": "b"}]"#;
        let snapshots = snapshots_from_json(raw);

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].title.as_deref(), Some("a"));
        assert_eq!(snapshots[0].message_count, 2);
        assert_eq!(snapshots[1].title.as_deref(), Some("b"));
    }

    #[test]
    fn test_from_json_tolerates_garbage() {
        assert!(snapshots_from_json("").is_empty());
        assert!(snapshots_from_json("{\"title\": 1}").is_empty());
        assert!(snapshots_from_json("[{").is_empty());
    }
}
