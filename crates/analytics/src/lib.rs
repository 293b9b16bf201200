//! Usage recording for FolioChat.
//!
//! Maintains two JSON documents in a local log directory: a cumulative
//! metrics counter map (`analytics.json`) and a bounded log of recent
//! conversation summaries (`conversations.json`). Recording is best-effort
//! by design — analytics must never break chat.

pub mod model;
pub mod tracker;

pub use model::{ConversationRecord, MetricsDocument, PREVIEW_CHARS, RECENT_CONVERSATION_CAP};
pub use tracker::UsageTracker;

/// Errors from the analytics subsystem.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
