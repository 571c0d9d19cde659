//! Error handling for the Gemini transport
//!
//! Variants separate the outcomes callers care about: a timeout on the final
//! attempt, a non-retryable HTTP status, a network failure on the final
//! attempt, and retries exhausted on rate limiting or unavailability.

use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

#[derive(Error, Debug)]
pub enum TransportError {
    /// Every attempt up to and including the last one hit the per-attempt timeout
    #[error("Gemini request timed out after {attempts} attempts")]
    Timeout { attempts: u32 },

    /// Non-retryable HTTP status, surfaced on the attempt that produced it
    #[error("Gemini API error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Connection-level failure on the last allowed attempt
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// 429/503 on every attempt
    #[error("Gemini request failed after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        last_status: Option<u16>,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }

}
