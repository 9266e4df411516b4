use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DISPLAY_TIME_FORMAT: &str = "%m/%d %H:%M";

/// One line of the conversation picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Position of the snapshot in the list it was rendered from
    pub index: usize,
    pub text: String,
}

/// Parse an ISO-8601 timestamp into local wall-clock time.
///
/// Offset-carrying values (including a trailing `Z`) are converted to the local
/// zone; naive values are taken as already local. Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Some(aware.with_timezone(&Local).naive_local());
    }
    if let Ok(aware) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(aware.with_timezone(&Local).naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub(crate) fn format_row(title: &str, time: Option<NaiveDateTime>, message_count: i64) -> String {
    let mut text = title.to_string();
    if let Some(time) = time {
        text.push_str(" • ");
        text.push_str(&time.format(DISPLAY_TIME_FORMAT).to_string());
    }
    if message_count > 0 {
        text.push_str(&format!(" • {} msgs", message_count));
    }
    text
}
