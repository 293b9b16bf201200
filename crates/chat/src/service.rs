//! The chat service — provider delegation and usage recording.
//!
//! Two states, decided once at startup: provider-configured (credential
//! present and the connection check passed) and provider-unavailable. There
//! are no transitions afterwards.

use crate::ChatError;
use crate::identity::Identity;
use foliochat_analytics::UsageTracker;
use foliochat_core::message::{HistoryExchange, Message};
use foliochat_core::provider::{Provider, ProviderRequest};
use std::sync::Arc;
use tracing::{error, info};

/// Reply used when no provider is configured at all.
pub const SERVICE_UNAVAILABLE_REPLY: &str =
    "I'm sorry, but the AI service is currently unavailable. Please check the API configuration.";

/// Reply used when the provider call fails.
pub const TROUBLE_REPLY: &str = "I apologize, but I'm having trouble processing your message \
right now. Please try again in a moment.";

/// How many trailing history exchanges are replayed to the provider.
const HISTORY_WINDOW: usize = 5;

/// The chat orchestrator.
///
/// Explicitly constructed with its provider, sampling configuration, loaded
/// persona, and usage tracker — no globals, so tests can substitute a mock
/// provider and a temp-dir tracker.
pub struct ChatService {
    provider: Option<Arc<dyn Provider>>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    identity: Identity,
    tracker: Arc<UsageTracker>,
}

impl ChatService {
    pub fn new(
        provider: Option<Arc<dyn Provider>>,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
        identity: Identity,
        tracker: Arc<UsageTracker>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens,
            identity,
            tracker,
        }
    }

    /// Whether a provider was configured at startup.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate a persona reply for `user_message` given the frontend's
    /// conversation history.
    ///
    /// Provider-unavailable short-circuits to the fixed unavailable string
    /// without a provider call or any analytics mutation. A provider failure
    /// is recorded under its error-category counter and returned as `Err`;
    /// the gateway flattens it into the fixed apology with `success: false`.
    pub async fn generate_response(
        &self,
        user_message: &str,
        history: &[HistoryExchange],
    ) -> Result<String, ChatError> {
        let Some(provider) = &self.provider else {
            return Ok(SERVICE_UNAVAILABLE_REPLY.to_string());
        };

        let request = ProviderRequest {
            model: self.model.clone(),
            messages: self.build_messages(user_message, history),
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
        };

        match provider.complete(request).await {
            Ok(response) => {
                let reply = response.message.content;
                self.tracker
                    .record_message(user_message, reply.chars().count());

                let preview: String = user_message.chars().take(50).collect();
                info!(message = %preview, "Generated response");
                Ok(reply)
            }
            Err(e) => {
                error!(error = %e, "Error generating response");
                self.tracker.record_error(e.category());
                Err(ChatError::Provider(e))
            }
        }
    }

    /// Build the provider message list: persona system prompt, then up to
    /// the last [`HISTORY_WINDOW`] exchanges in original order, then the
    /// current message.
    fn build_messages(&self, user_message: &str, history: &[HistoryExchange]) -> Vec<Message> {
        let mut messages = vec![Message::system(self.identity.system_prompt())];

        let start = history.len().saturating_sub(HISTORY_WINDOW);
        for exchange in &history[start..] {
            if let Some(user) = &exchange.user {
                messages.push(Message::user(user));
            }
            if let Some(assistant) = &exchange.assistant {
                messages.push(Message::assistant(assistant));
            }
        }

        messages.push(Message::user(user_message));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foliochat_config::ContactConfig;
    use foliochat_core::error::ProviderError;
    use foliochat_core::message::Role;
    use foliochat_core::provider::{ProviderResponse, Usage};
    use tempfile::TempDir;

    /// A provider that returns one scripted outcome for every call.
    struct MockProvider {
        outcome: Result<String, ProviderError>,
    }

    impl MockProvider {
        fn replying(text: &str) -> Self {
            Self {
                outcome: Ok(text.to_string()),
            }
        }

        fn failing(error: ProviderError) -> Self {
            Self {
                outcome: Err(error),
            }
        }
    }

    #[async_trait::async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            match &self.outcome {
                Ok(text) => Ok(ProviderResponse {
                    message: Message::assistant(text),
                    usage: Some(Usage {
                        prompt_tokens: 10,
                        completion_tokens: 5,
                        total_tokens: 15,
                    }),
                    model: "mock-model".into(),
                }),
                Err(e) => Err(e.clone()),
            }
        }
    }

    fn test_identity() -> Identity {
        Identity {
            persona_name: "Satish".into(),
            context: "Resume text.".into(),
            contact: ContactConfig::default(),
        }
    }

    fn service(provider: Option<Arc<dyn Provider>>) -> (TempDir, ChatService, Arc<UsageTracker>) {
        let dir = TempDir::new().unwrap();
        let tracker = Arc::new(UsageTracker::new(dir.path()));
        let service = ChatService::new(
            provider,
            "mock-model",
            0.7,
            1000,
            test_identity(),
            tracker.clone(),
        );
        (dir, service, tracker)
    }

    #[tokio::test]
    async fn unavailable_provider_returns_fixed_reply_without_recording() {
        let (_dir, service, tracker) = service(None);

        let reply = service.generate_response("hello", &[]).await.unwrap();
        assert_eq!(reply, SERVICE_UNAVAILABLE_REPLY);
        assert!(!service.is_configured());

        let summary = tracker.summary().unwrap();
        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn successful_reply_is_recorded() {
        let (_dir, service, tracker) =
            service(Some(Arc::new(MockProvider::replying("Hi, I'm Satish!"))));

        let reply = service.generate_response("hello", &[]).await.unwrap();
        assert_eq!(reply, "Hi, I'm Satish!");

        let summary = tracker.summary().unwrap();
        assert_eq!(summary.get("total_messages"), 1);
        assert_eq!(
            summary.get("total_response_chars"),
            "Hi, I'm Satish!".chars().count() as u64
        );
    }

    #[tokio::test]
    async fn provider_failure_returns_error_and_records_category() {
        let (_dir, service, tracker) = service(Some(Arc::new(MockProvider::failing(
            ProviderError::RateLimited { retry_after_secs: 5 },
        ))));

        let result = service.generate_response("hello", &[]).await;
        assert!(matches!(result, Err(ChatError::Provider(_))));

        let summary = tracker.summary().unwrap();
        assert_eq!(summary.get("errors_rate_limited"), 1);
        assert_eq!(summary.get("total_messages"), 0);
    }

    #[tokio::test]
    async fn message_list_starts_with_persona_and_ends_with_user() {
        let (_dir, service, _tracker) = service(None);

        let history = vec![HistoryExchange {
            user: Some("earlier question".into()),
            assistant: Some("earlier answer".into()),
        }];
        let messages = service.build_messages("current question", &history);

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("You are Satish"));
        assert_eq!(messages[1].content, "earlier question");
        assert_eq!(messages[2].content, "earlier answer");
        assert_eq!(messages[3].role, Role::User);
        assert_eq!(messages[3].content, "current question");
    }

    #[tokio::test]
    async fn history_window_keeps_last_five_exchanges() {
        let (_dir, service, _tracker) = service(None);

        let history: Vec<HistoryExchange> = (0..8)
            .map(|i| HistoryExchange {
                user: Some(format!("q{i}")),
                assistant: Some(format!("a{i}")),
            })
            .collect();
        let messages = service.build_messages("now", &history);

        // System + 5 exchanges * 2 + current = 12
        assert_eq!(messages.len(), 12);
        assert_eq!(messages[1].content, "q3");
        assert_eq!(messages[10].content, "a7");
    }

    #[tokio::test]
    async fn half_empty_exchanges_contribute_one_message() {
        let (_dir, service, _tracker) = service(None);

        let history = vec![
            HistoryExchange {
                user: Some("only user".into()),
                assistant: None,
            },
            HistoryExchange {
                user: None,
                assistant: Some("only assistant".into()),
            },
        ];
        let messages = service.build_messages("now", &history);

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content, "only user");
        assert_eq!(messages[2].content, "only assistant");
    }

    #[tokio::test]
    async fn reply_length_counted_in_characters() {
        let (_dir, service, tracker) = service(Some(Arc::new(MockProvider::replying("héllo"))));

        service.generate_response("hi", &[]).await.unwrap();

        let summary = tracker.summary().unwrap();
        assert_eq!(summary.get("total_response_chars"), 5);
    }
}
