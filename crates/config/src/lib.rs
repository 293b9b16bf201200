//! Configuration loading, validation, and management for FolioChat.
//!
//! Loads configuration from `~/.foliochat/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.foliochat/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM provider API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model used for persona replies
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Persona identity configuration
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Contact details shown in the persona prompt and the profile document
    #[serde(default)]
    pub contact: ContactConfig,

    /// The public profile document served at /api/profile
    #[serde(default)]
    pub profile: ProfileConfig,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_max_tokens() -> u32 {
    1000
}
fn default_temperature() -> f32 {
    0.7
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("gateway", &self.gateway)
            .field("analytics", &self.analytics)
            .field("identity", &self.identity)
            .field("contact", &self.contact)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Allowed CORS origins. Extended by the `CORS_ORIGINS` env var
    /// (comma-separated).
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_port() -> u16 {
    8310
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3010".into(),
        "http://127.0.0.1:3010".into(),
    ]
}
fn default_static_dir() -> String {
    "static".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            cors_origins: default_cors_origins(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Directory holding analytics.json and conversations.json
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_log_dir() -> String {
    "logs".into()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// First name the persona answers as
    #[serde(default = "default_persona_name")]
    pub persona_name: String,

    /// Path to the resume/context text file the persona draws from
    #[serde(default = "default_context_file")]
    pub context_file: String,
}

fn default_persona_name() -> String {
    "Alex".into()
}
fn default_context_file() -> String {
    "static/resume.txt".into()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            persona_name: default_persona_name(),
            context_file: default_context_file(),
        }
    }
}

/// Contact details, interpolated into the persona prompt and returned with
/// the profile document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub github: String,

    #[serde(default)]
    pub linkedin: String,
}

/// The static profile document served at /api/profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub experience: String,

    #[serde(default)]
    pub current_role: String,

    #[serde(default)]
    pub education: String,

    #[serde(default)]
    pub photo_url: String,

    #[serde(default)]
    pub expertise_areas: Vec<ExpertiseArea>,

    #[serde(default)]
    pub achievements: Vec<String>,
}

/// One card in the profile's expertise grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertiseArea {
    pub area: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

impl AppConfig {
    /// Load configuration from the default path (~/.foliochat/config.toml).
    ///
    /// Environment variables override file settings:
    /// - `FOLIOCHAT_API_KEY` / `OPENAI_API_KEY` — provider credential
    /// - `API_BASE_URL`, `MODEL_NAME`, `MAX_TOKENS`, `TEMPERATURE`
    /// - `CORS_ORIGINS` — comma-separated extra allowed origins
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path, without env overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of file settings.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("FOLIOCHAT_API_KEY") {
            self.api_key = Some(key);
        } else if self.api_key.is_none() {
            self.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        if let Ok(url) = std::env::var("API_BASE_URL") {
            self.api_url = url;
        }
        if let Ok(model) = std::env::var("MODEL_NAME") {
            self.model = model;
        }
        if let Ok(max_tokens) = std::env::var("MAX_TOKENS") {
            match max_tokens.parse() {
                Ok(v) => self.max_tokens = v,
                Err(_) => tracing::warn!(value = %max_tokens, "Ignoring unparsable MAX_TOKENS"),
            }
        }
        if let Ok(temperature) = std::env::var("TEMPERATURE") {
            match temperature.parse() {
                Ok(v) => self.temperature = v,
                Err(_) => tracing::warn!(value = %temperature, "Ignoring unparsable TEMPERATURE"),
            }
        }
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            self.gateway.cors_origins.extend(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from),
            );
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".foliochat")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for the `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            gateway: GatewayConfig::default(),
            analytics: AnalyticsConfig::default(),
            identity: IdentityConfig::default(),
            contact: ContactConfig::default(),
            profile: ProfileConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
