use async_trait::async_trait;

use crate::error::TransportError;

/// One logical call to a text-generation endpoint.
///
/// Implementations own their retry and timeout policy and return the raw
/// response body of the first successful attempt.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn send(&self, prompt: &str, credential: &str) -> Result<String, TransportError>;
}
