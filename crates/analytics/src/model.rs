//! Persisted analytics document types.
//!
//! The on-disk format is fixed for compatibility with existing dashboards:
//! `analytics.json` is a flat map of counter name → integer plus a
//! `last_updated` timestamp; `conversations.json` is a JSON array of
//! conversation records, newest last.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of records kept in the conversation log. Oldest entries
/// are evicted first — a privacy/size bound, not a correctness structure.
pub const RECENT_CONVERSATION_CAP: usize = 100;

/// Number of characters of the user message kept in the preview.
pub const PREVIEW_CHARS: usize = 100;

/// Marker appended to previews of messages longer than [`PREVIEW_CHARS`].
pub const PREVIEW_MARKER: &str = "...";

/// The cumulative metrics counter map.
///
/// Counter keys are created on first use; values only grow within a process
/// lifetime. Serializes to a flat JSON object with the counters at top level
/// next to `last_updated`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsDocument {
    /// Counter name → count
    #[serde(flatten)]
    pub counters: BTreeMap<String, u64>,

    /// When any counter was last written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl MetricsDocument {
    /// Add `delta` to the named counter, creating it at zero if absent,
    /// and stamp `last_updated`.
    pub fn bump(&mut self, metric: &str, delta: u64) {
        *self.counters.entry(metric.to_string()).or_insert(0) += delta;
        self.last_updated = Some(Utc::now());
    }

    /// Read a counter, treating absent as zero.
    pub fn get(&self, metric: &str) -> u64 {
        self.counters.get(metric).copied().unwrap_or(0)
    }

    /// Whether no counter has ever been written.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

/// One logged summary of a single chat exchange — lengths and a short
/// preview, never the full content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// When the exchange happened
    pub timestamp: DateTime<Utc>,

    /// Visitor message length in characters
    pub user_message_length: usize,

    /// Reply length in characters
    pub response_length: usize,

    /// First [`PREVIEW_CHARS`] characters of the visitor message
    pub user_message_preview: String,
}

impl ConversationRecord {
    /// Build a record from a visitor message and the reply length.
    pub fn new(user_message: &str, response_length: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            user_message_length: user_message.chars().count(),
            response_length,
            user_message_preview: preview(user_message),
        }
    }
}

/// Truncate a message to its first [`PREVIEW_CHARS`] characters, appending
/// a marker when anything was cut. Operates on characters, not bytes, so
/// multibyte input never splits a boundary.
fn preview(message: &str) -> String {
    let mut chars = message.char_indices();
    match chars.nth(PREVIEW_CHARS) {
        Some((byte_idx, _)) => format!("{}{PREVIEW_MARKER}", &message[..byte_idx]),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_creates_and_increments() {
        let mut doc = MetricsDocument::default();
        assert_eq!(doc.get("total_messages"), 0);

        doc.bump("total_messages", 1);
        doc.bump("total_messages", 1);
        doc.bump("total_response_chars", 42);

        assert_eq!(doc.get("total_messages"), 2);
        assert_eq!(doc.get("total_response_chars"), 42);
        assert!(doc.last_updated.is_some());
    }

    #[test]
    fn metrics_serialize_flat() {
        let mut doc = MetricsDocument::default();
        doc.bump("conversation_starts", 1);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["conversation_starts"], 1);
        assert!(json["last_updated"].is_string());
    }

    #[test]
    fn metrics_deserialize_flat() {
        let json = r#"{"total_messages": 7, "errors_network": 2, "last_updated": "2026-08-01T12:00:00Z"}"#;
        let doc: MetricsDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.get("total_messages"), 7);
        assert_eq!(doc.get("errors_network"), 2);
        assert!(doc.last_updated.is_some());
    }

    #[test]
    fn short_message_preview_is_identity() {
        let msg = "hello there";
        let record = ConversationRecord::new(msg, 5);
        assert_eq!(record.user_message_preview, msg);
        assert_eq!(record.user_message_length, 11);
        assert_eq!(record.response_length, 5);
    }

    #[test]
    fn exactly_preview_length_not_truncated() {
        let msg = "x".repeat(PREVIEW_CHARS);
        let record = ConversationRecord::new(&msg, 0);
        assert_eq!(record.user_message_preview, msg);
    }

    #[test]
    fn long_message_preview_truncated_with_marker() {
        let msg = "y".repeat(PREVIEW_CHARS + 50);
        let record = ConversationRecord::new(&msg, 0);
        assert_eq!(
            record.user_message_preview,
            format!("{}{}", "y".repeat(PREVIEW_CHARS), PREVIEW_MARKER)
        );
        assert_eq!(record.user_message_length, PREVIEW_CHARS + 50);
    }

    #[test]
    fn multibyte_preview_respects_char_boundaries() {
        let msg = "é".repeat(PREVIEW_CHARS + 1);
        let record = ConversationRecord::new(&msg, 0);
        assert_eq!(
            record.user_message_preview,
            format!("{}{}", "é".repeat(PREVIEW_CHARS), PREVIEW_MARKER)
        );
    }

    #[test]
    fn record_field_names_match_on_disk_format() {
        let record = ConversationRecord::new("hi", 3);
        let json = serde_json::to_value(&record).unwrap();
        for field in [
            "timestamp",
            "user_message_length",
            "response_length",
            "user_message_preview",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }
}
