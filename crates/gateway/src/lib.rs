//! HTTP API gateway for FolioChat.
//!
//! Exposes the portfolio chat surface: health probes, the chat endpoint,
//! the static profile document, the analytics summary, and static file
//! serving. Built on Axum.
//!
//! Propagation policy: chat failures never surface as a 5xx. Provider
//! errors are flattened into HTTP 200 with `success: false` and a fixed
//! apology — graceful degradation for an end-user-facing chat widget.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use foliochat_analytics::{MetricsDocument, UsageTracker};
use foliochat_chat::{ChatService, Identity, TROUBLE_REPLY};
use foliochat_config::AppConfig;
use foliochat_core::message::HistoryExchange;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub chat: ChatService,
    pub tracker: Arc<UsageTracker>,
    /// Pre-rendered profile document (profile config + contact details).
    pub profile: serde_json::Value,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            config
                .gateway
                .cors_origins
                .iter()
                .filter_map(|origin| match origin.parse::<axum::http::HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "Ignoring unparsable CORS origin");
                        None
                    }
                }),
        ))
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root_handler))
        .route("/api/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/profile", get(profile_handler))
        .route("/api/analytics", get(analytics_handler))
        .nest_service("/static", ServeDir::new(&config.gateway.static_dir))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// The provider-configured/unavailable state is decided here, once: a
/// credential must be present and the connection check must pass. Failure
/// degrades to the fixed unavailable reply instead of aborting startup.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let provider = match foliochat_providers::build_from_config(&config) {
        Some(provider) => match provider.health_check().await {
            Ok(true) => {
                info!(model = %config.model, "Provider connection verified");
                Some(provider)
            }
            Ok(false) => {
                error!("Provider rejected the connection check — AI chat will be unavailable");
                None
            }
            Err(e) => {
                error!(error = %e, "Provider connection check failed — AI chat will be unavailable");
                None
            }
        },
        None => None,
    };

    let identity = Identity::load(&config.identity, &config.contact);
    let tracker = Arc::new(UsageTracker::new(&config.analytics.log_dir));
    let chat = ChatService::new(
        provider,
        &config.model,
        config.temperature,
        config.max_tokens,
        identity,
        tracker.clone(),
    );

    let state = Arc::new(GatewayState {
        chat,
        tracker,
        profile: profile_document(&config),
    });

    let app = build_router(state, &config);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Merge the profile config and contact details into the document served
/// at /api/profile.
pub fn profile_document(config: &AppConfig) -> serde_json::Value {
    let mut doc = serde_json::to_value(&config.profile).unwrap_or_default();
    if let Some(obj) = doc.as_object_mut() {
        obj.insert(
            "contact".into(),
            serde_json::to_value(&config.contact).unwrap_or_default(),
        );
    }
    doc
}

// --- Handlers ---

#[derive(Serialize)]
struct RootResponse {
    message: &'static str,
    status: &'static str,
}

async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "FolioChat API is running",
        status: "healthy",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    api_configured: bool,
    timestamp: DateTime<Utc>,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        api_configured: state.chat.is_configured(),
        timestamp: Utc::now(),
    })
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,

    #[serde(default)]
    history: Vec<HistoryExchange>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    if payload.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse {
                response: String::new(),
                success: false,
                error: Some("Message cannot be empty".into()),
            }),
        );
    }

    // An empty history marks the first exchange of a new conversation.
    if payload.history.is_empty() {
        state.tracker.record_conversation_start();
    }

    match state
        .chat
        .generate_response(&payload.message, &payload.history)
        .await
    {
        Ok(response) => (
            StatusCode::OK,
            Json(ChatResponse {
                response,
                success: true,
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::OK,
            Json(ChatResponse {
                response: TROUBLE_REPLY.to_string(),
                success: false,
                error: Some(e.to_string()),
            }),
        ),
    }
}

async fn profile_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(state.profile.clone())
}

#[derive(Serialize)]
struct AnalyticsResponse {
    success: bool,
    data: MetricsDocument,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn analytics_handler(State(state): State<SharedState>) -> Json<AnalyticsResponse> {
    match state.tracker.summary() {
        Ok(data) => Json(AnalyticsResponse {
            success: true,
            data,
            error: None,
        }),
        Err(e) => {
            error!(error = %e, "Error reading analytics summary");
            Json(AnalyticsResponse {
                success: false,
                data: MetricsDocument::default(),
                error: Some(e.to_string()),
            })
        }
    }
}
