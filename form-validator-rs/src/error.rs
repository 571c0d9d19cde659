//! Error responses for the form validator
//!
//! Each variant maps to one HTTP status and a fixed JSON body. Details that
//! only operators should see are logged where the error is raised and never
//! serialized.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gemini_client::TransportError;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("Missing or invalid 'prompt' in request body")]
    InvalidInput,

    #[error("Server misconfiguration")]
    MissingCredential,

    #[error("Invalid AI response format")]
    InvalidResponseFormat { raw: String },

    #[error("AI request timed out")]
    Timeout,

    #[error("AI API error")]
    Upstream { details: String },

    #[error("Server error")]
    Internal(String),
}

impl ValidatorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::MissingCredential | Self::InvalidResponseFormat { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// JSON body sent to the caller
    pub fn body(&self) -> Value {
        match self {
            Self::InvalidResponseFormat { raw } => json!({ "error": self.to_string(), "raw": raw }),
            Self::Upstream { details } => json!({ "error": self.to_string(), "details": details }),
            _ => json!({ "error": self.to_string() }),
        }
    }
}

impl From<TransportError> for ValidatorError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { .. } => ValidatorError::Timeout,
            TransportError::Upstream { .. } => ValidatorError::Upstream {
                details: err.to_string(),
            },
            other => ValidatorError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ValidatorError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}
