//! The usage tracker — read-modify-write JSON persistence.
//!
//! Every mutation reads the whole document from disk, applies the update in
//! memory, and writes the whole document back. A missing file is the empty
//! state, never an error. There is no locking: two concurrent writers can
//! race and the last write wins, which is accepted at this scale.

use crate::AnalyticsError;
use crate::model::{ConversationRecord, MetricsDocument, RECENT_CONVERSATION_CAP};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the metrics counter document.
const METRICS_FILE: &str = "analytics.json";

/// File name of the conversation log document.
const CONVERSATIONS_FILE: &str = "conversations.json";

/// Records aggregate usage counters and a capped recent-conversation log
/// under a local directory.
///
/// The `record_*` operations never fail their caller: storage errors beyond
/// file-not-found are logged and swallowed so analytics can never break the
/// chat path. `summary()` does surface errors, so the analytics endpoint can
/// report them in-band.
pub struct UsageTracker {
    log_dir: PathBuf,
}

impl UsageTracker {
    /// Create a tracker rooted at `log_dir`. The directory and both
    /// documents are created lazily on first write.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let log_dir = log_dir.into();
        debug!(dir = %log_dir.display(), "Usage tracker initialized");
        Self { log_dir }
    }

    /// Record the start of a new conversation.
    pub fn record_conversation_start(&self) {
        if let Err(e) = self.bump("conversation_starts", 1) {
            warn!(error = %e, "Failed to record conversation start");
        }
    }

    /// Record one chat exchange: counter updates plus a log entry derived
    /// from the visitor message and the reply length (in characters).
    pub fn record_message(&self, user_message: &str, response_length: usize) {
        if let Err(e) = self.bump("total_messages", 1) {
            warn!(error = %e, "Failed to record message counter");
        }
        if let Err(e) = self.bump("total_response_chars", response_length as u64) {
            warn!(error = %e, "Failed to record response length counter");
        }

        let record = ConversationRecord::new(user_message, response_length);
        if let Err(e) = self.append_conversation(record) {
            warn!(error = %e, "Failed to append conversation record");
        }
    }

    /// Record an error occurrence under its category counter
    /// (e.g. `errors_rate_limited`).
    pub fn record_error(&self, error_kind: &str) {
        if let Err(e) = self.bump(&format!("errors_{error_kind}"), 1) {
            warn!(error = %e, kind = %error_kind, "Failed to record error counter");
        }
    }

    /// The persisted metrics document. A fresh log directory yields an
    /// empty document, not an error.
    pub fn summary(&self) -> Result<MetricsDocument, AnalyticsError> {
        read_document(&self.metrics_path())
    }

    /// The persisted conversation log, oldest first.
    pub fn recent_conversations(&self) -> Result<Vec<ConversationRecord>, AnalyticsError> {
        read_document(&self.conversations_path())
    }

    fn metrics_path(&self) -> PathBuf {
        self.log_dir.join(METRICS_FILE)
    }

    fn conversations_path(&self) -> PathBuf {
        self.log_dir.join(CONVERSATIONS_FILE)
    }

    /// Read-modify-write one counter.
    fn bump(&self, metric: &str, delta: u64) -> Result<(), AnalyticsError> {
        let mut doc: MetricsDocument = read_document(&self.metrics_path())?;
        doc.bump(metric, delta);
        self.write_document(&self.metrics_path(), &doc)
    }

    /// Read-modify-write the conversation log, evicting past the cap.
    fn append_conversation(&self, record: ConversationRecord) -> Result<(), AnalyticsError> {
        let mut log: Vec<ConversationRecord> = read_document(&self.conversations_path())?;
        log.push(record);

        if log.len() > RECENT_CONVERSATION_CAP {
            let excess = log.len() - RECENT_CONVERSATION_CAP;
            log.drain(..excess);
        }

        self.write_document(&self.conversations_path(), &log)
    }

    fn write_document<T: serde::Serialize>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<(), AnalyticsError> {
        std::fs::create_dir_all(&self.log_dir)
            .map_err(|e| AnalyticsError::Storage(format!("failed to create log directory: {e}")))?;

        let content = serde_json::to_vec_pretty(value)?;
        std::fs::write(path, content)
            .map_err(|e| AnalyticsError::Storage(format!("failed to write {}: {e}", path.display())))
    }
}

/// Read a JSON document, treating a missing file as the default value.
fn read_document<T>(path: &Path) -> Result<T, AnalyticsError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(AnalyticsError::Storage(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    Ok(serde_json::from_str(&content)?)
}
