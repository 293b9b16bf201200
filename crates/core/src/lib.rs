//! Core domain types for FolioChat.
//!
//! Everything the other crates agree on lives here: the message and
//! conversation-history value objects, the `Provider` trait that abstracts
//! the LLM backend, and the provider error taxonomy.

pub mod error;
pub mod message;
pub mod provider;

pub use error::ProviderError;
pub use message::{HistoryExchange, Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
