//! Chat orchestration for FolioChat.
//!
//! Turns a visitor message plus short conversation history into a
//! persona-voiced reply: loads the resume-backed identity, builds the
//! message list, delegates to the configured provider, and records the
//! exchange with the usage tracker.

pub mod identity;
pub mod service;

pub use identity::Identity;
pub use service::{ChatService, SERVICE_UNAVAILABLE_REPLY, TROUBLE_REPLY};

use foliochat_core::ProviderError;

/// Errors from the chat orchestrator.
///
/// These never reach the HTTP caller as a status code — the gateway flattens
/// them into a 200 response with `success: false` and a fixed apology.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}
