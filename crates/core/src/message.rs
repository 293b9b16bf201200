//! Message domain types.
//!
//! These are the value objects that flow through the system:
//! a visitor sends a message → the orchestrator builds a persona-conditioned
//! message list → the provider generates a reply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The site visitor
    User,
    /// The persona reply
    Assistant,
    /// Persona instructions (system prompt)
    System,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, content)
    }

    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One prior exchange in the conversation history sent by the frontend.
///
/// Either side may be absent (e.g. the exchange that is still waiting for
/// a reply carries only the `user` half).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryExchange {
    /// What the visitor said
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// What the persona answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Hello there!");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello there!");
        assert!(!msg.id.is_empty());
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = Message::system("persona");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""role":"system""#));
    }

    #[test]
    fn history_exchange_halves_optional() {
        let json = r#"{"user":"hi"}"#;
        let exchange: HistoryExchange = serde_json::from_str(json).unwrap();
        assert_eq!(exchange.user.as_deref(), Some("hi"));
        assert!(exchange.assistant.is_none());
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::assistant("A reply");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "A reply");
        assert_eq!(deserialized.role, Role::Assistant);
    }
}
