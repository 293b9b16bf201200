//! LLM provider implementation for FolioChat.
//!
//! One backend matters here: any endpoint speaking the OpenAI chat
//! completions dialect. `build_from_config` decides the
//! configured/unavailable state once at startup.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use foliochat_config::AppConfig;
use foliochat_core::Provider;
use std::sync::Arc;
use tracing::warn;

/// Build the provider from configuration.
///
/// Returns `None` when no API key is available — the gateway then serves
/// every chat request with the fixed unavailable message instead of
/// attempting provider calls.
pub fn build_from_config(config: &AppConfig) -> Option<Arc<dyn Provider>> {
    match &config.api_key {
        Some(key) => Some(Arc::new(OpenAiCompatProvider::new(
            "openai",
            &config.api_url,
            key,
        ))),
        None => {
            warn!("No API key configured — AI chat will be unavailable");
            None
        }
    }
}
