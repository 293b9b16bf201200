//! Provider error taxonomy.
//!
//! Uses `thiserror` for ergonomic error definitions. The orchestrator maps
//! these into error-category counters and a fixed user-facing apology; they
//! never reach the HTTP caller as a 5xx.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// A short stable label for this error, used as an analytics counter
    /// suffix (e.g. `errors_rate_limited`).
    pub fn category(&self) -> &'static str {
        match self {
            ProviderError::ApiError { .. } => "api",
            ProviderError::RateLimited { .. } => "rate_limited",
            ProviderError::AuthenticationFailed(_) => "auth",
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Network(_) => "network",
        }
    }
}
