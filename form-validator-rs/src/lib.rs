//! Form validator service
//!
//! Accepts a form definition over HTTP, asks a generative model for
//! validation rules, accessibility issues, UX suggestions and edge cases, and
//! returns the structured reply.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use config_rs::ConfigProvider;
use gemini_client::GenerationTransport;
use serde::Serialize;
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod prompt;
pub mod result;
pub mod settings;

pub use error::ValidatorError;
pub use orchestrator::FormValidator;
pub use result::{Category, ParsedResult, Suggestions};
pub use settings::ValidatorSettings;

pub const SERVICE_NAME: &str = "form-validator";

/// Largest request body accepted, in bytes
pub const MAX_PAYLOAD_SIZE: usize = 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub service_name: String,
    pub uptime_seconds: i64,
    pub status: String,
    pub mock_mode: bool,
    pub credential_configured: bool,
}

/// Shared application state
pub struct AppState {
    validator: FormValidator,
    started: Instant,
}

impl AppState {
    pub fn new(transport: Arc<dyn GenerationTransport>, config: Arc<dyn ConfigProvider>) -> Self {
        Self {
            validator: FormValidator::new(transport, config),
            started: Instant::now(),
        }
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/form-validator", post(form_validator_handler))
        .route("/api/hello", post(hello_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_PAYLOAD_SIZE))
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .with_state(state)
}

async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /health",
            "POST /api/form-validator",
            "POST /api/hello"
        ]
    }))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let settings = state.validator.settings();
    let credential_configured = settings.api_key.is_some();

    // Without a credential only mock mode can answer
    let status = if settings.mock_mode || credential_configured {
        "SERVING"
    } else {
        "DEGRADED"
    };

    Json(HealthResponse {
        healthy: true,
        service_name: SERVICE_NAME.to_string(),
        uptime_seconds: state.started.elapsed().as_secs() as i64,
        status: status.to_string(),
        mock_mode: settings.mock_mode,
        credential_configured,
    })
}

/// `POST /api/form-validator`
///
/// The body is read as raw bytes so that malformed JSON is reported with the
/// same 400 body as a missing `prompt`.
async fn form_validator_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<ParsedResult>), ValidatorError> {
    let body: Value = serde_json::from_slice(&body).map_err(|err| {
        debug!(error = %err, "Request body is not valid JSON");
        ValidatorError::InvalidInput
    })?;

    let result = state.validator.handle(&body).await?;
    Ok((StatusCode::OK, Json(result)))
}

async fn hello_handler(body: Bytes) -> impl IntoResponse {
    let received = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
    Json(serde_json::json!({
        "message": "API route is ready",
        "received": received
    }))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Handler panicked");

    ValidatorError::Internal(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_panic_degrades_to_server_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Server error" }));
    }
}
