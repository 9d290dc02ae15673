//! HTTP API gateway for Faqline.
//!
//! Exposes the chat endpoint and a health check. Each chat request runs the
//! tiered resolution pipeline against a freshly loaded FAQ catalog.
//!
//! Built on Axum for high performance async HTTP.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use faqline_audit::build_from_config as build_audit;
use faqline_catalog::CsvCatalog;
use faqline_core::audit::RequestCounter;
use faqline_core::catalog::FaqSource;
use faqline_core::error::Error;
use faqline_core::resolution::AnswerSource;
use faqline_core::turn::Conversation;
use faqline_providers::build_from_config as build_generator;
use faqline_resolve::{ResolutionPipeline, ResolveRequest};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub pipeline: ResolutionPipeline,
    pub catalog: Arc<dyn FaqSource>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - Request body size limit (1 MB)
/// - Permissive CORS (the chat endpoint serves browser frontends)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Builds the generator, audit sink, and catalog once from configuration
/// and shares them across requests via the router state.
pub async fn start(config: faqline_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let host = config.gateway.host.clone();
    let port = config.gateway.port;
    let addr = format!("{host}:{port}");

    let generator = build_generator(&config);
    let audit = build_audit(&config);
    let counter = Arc::new(RequestCounter::new());
    let catalog: Arc<dyn FaqSource> = Arc::new(CsvCatalog::new(config.faq.path.clone()));

    let mut pipeline = ResolutionPipeline::new(generator, audit, counter)
        .with_max_turns(config.conversation.max_turns)
        .with_pin_persona(config.conversation.pin_persona)
        .with_max_tokens(config.max_tokens)
        .with_temperature(config.temperature);
    if let Some(persona) = &config.conversation.persona {
        pipeline = pipeline.with_persona(persona);
    }

    let state = Arc::new(GatewayState { pipeline, catalog });
    let app = build_router(state);

    info!(addr = %addr, faq_path = %config.faq.path.display(), "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    /// Absent or empty rejects the request with 400.
    #[serde(default)]
    message: String,

    #[serde(default)]
    conversation: Conversation,

    #[serde(default)]
    max_tokens: Option<u32>,

    #[serde(default)]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    source: AnswerSource,
    conversation: Conversation,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let faqs = state
        .catalog
        .load()
        .await
        .map_err(|e| internal_error(&Error::from(e)))?;

    let request = ResolveRequest {
        message: payload.message,
        conversation: payload.conversation,
        max_tokens: payload.max_tokens,
        temperature: payload.temperature,
    };

    match state.pipeline.resolve(request, &faqs).await {
        Ok(resolution) => Ok(Json(ChatResponse {
            response: resolution.answer,
            source: resolution.source,
            conversation: resolution.conversation,
        })),
        Err(Error::InvalidRequest) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Message content is required.".into(),
            }),
        )),
        Err(e) => Err(internal_error(&e)),
    }
}

/// The caller gets a generic message; the cause stays in the logs.
fn internal_error(e: &Error) -> (StatusCode, Json<ErrorResponse>) {
    error!(error = %e, "Chat request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "An error occurred while processing your request.".into(),
        }),
    )
}
