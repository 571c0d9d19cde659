//! HTTP client for the Gemini `generateContent` endpoint
//!
//! Every call to [`GeminiClient::send`] runs its own attempt loop:
//! - up to `max_retries + 1` attempts, each bounded by `attempt_timeout`
//! - 429/503 responses and network failures are retried with backoff
//! - a timeout is retried unless it happened on the last attempt
//! - any other non-2xx status fails immediately
//!
//! Nothing is shared between calls except the pooled `reqwest::Client`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::backoff::RetryPolicy;
use crate::config::GeminiConfig;
use crate::error::{Result, TransportError};
use crate::models::GenerateContentRequest;
use crate::transport::GenerationTransport;

/// Outcome of a single attempt
#[derive(Debug)]
pub enum AttemptOutcome {
    /// 2xx, raw body text
    Success(String),
    /// 429 or 503, with the wait computed from the response
    Retryable { status: u16, wait: Duration },
    /// The attempt deadline elapsed before a full response arrived
    TimedOut,
    /// Connection-level failure, URL stripped
    NetworkFailure(reqwest::Error),
    /// Any other status
    Fatal { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
    policy: RetryPolicy,
}

impl GeminiClient {
    /// Creates a client with the default retry policy
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("form-validator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
            policy: RetryPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Execute a single attempt under the per-attempt deadline
    async fn attempt(
        &self,
        request: &GenerateContentRequest,
        credential: &str,
        attempt: u32,
    ) -> AttemptOutcome {
        let url = self.config.generate_content_url();

        let exchange = async {
            let response = self
                .http_client
                .post(&url)
                .query(&[("key", credential)])
                .json(request)
                .send()
                .await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.text().await?;
            Ok::<(StatusCode, HeaderMap, String), reqwest::Error>((status, headers, body))
        };

        let (status, headers, body) =
            match tokio::time::timeout(self.policy.attempt_timeout, exchange).await {
                Err(_elapsed) => return AttemptOutcome::TimedOut,
                Ok(Err(err)) if err.is_timeout() => return AttemptOutcome::TimedOut,
                // The request URL carries the credential
                Ok(Err(err)) => return AttemptOutcome::NetworkFailure(err.without_url()),
                Ok(Ok(parts)) => parts,
            };

        if status.is_success() {
            return AttemptOutcome::Success(body);
        }

        match status {
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => {
                AttemptOutcome::Retryable {
                    status: status.as_u16(),
                    wait: self.policy.rate_limit_delay(&body, &headers, attempt),
                }
            }
            _ => AttemptOutcome::Fatal {
                status: status.as_u16(),
                body,
            },
        }
    }
}

#[async_trait]
impl GenerationTransport for GeminiClient {
    async fn send(&self, prompt: &str, credential: &str) -> Result<String> {
        let request = GenerateContentRequest::user_prompt(prompt);
        let max_retries = self.policy.max_retries;
        let mut last_status = None;

        info!(
            model = %self.config.model,
            prompt_bytes = prompt.len(),
            "Sending generateContent request"
        );

        for attempt in 0..=max_retries {
            let is_last = attempt == max_retries;
            if attempt > 0 {
                debug!(attempt, "Retry attempt for generateContent request");
            }

            let wait = match self.attempt(&request, credential, attempt).await {
                AttemptOutcome::Success(body) => {
                    info!(attempt, body_bytes = body.len(), "generateContent request succeeded");
                    return Ok(body);
                }
                AttemptOutcome::Fatal { status, body } => {
                    warn!(attempt, status, "generateContent request failed with non-retryable status");
                    return Err(TransportError::Upstream { status, body });
                }
                AttemptOutcome::Retryable { status, wait } => {
                    last_status = Some(status);
                    if is_last {
                        break;
                    }
                    warn!(attempt, status, wait_ms = wait.as_millis() as u64, "Upstream busy, retrying");
                    wait
                }
                AttemptOutcome::TimedOut => {
                    if is_last {
                        warn!(attempt, "generateContent request timed out on final attempt");
                        return Err(TransportError::Timeout {
                            attempts: attempt + 1,
                        });
                    }
                    let wait = self.policy.exponential_delay(attempt);
                    warn!(attempt, wait_ms = wait.as_millis() as u64, "Attempt timed out, retrying");
                    wait
                }
                AttemptOutcome::NetworkFailure(err) => {
                    if is_last {
                        warn!(attempt, error = %err, "Network failure on final attempt");
                        return Err(TransportError::Network(err));
                    }
                    let wait = self.policy.jittered_delay(attempt);
                    warn!(attempt, error = %err, wait_ms = wait.as_millis() as u64, "Network failure, retrying");
                    wait
                }
            };

            tokio::time::sleep(wait).await;
        }

        let attempts = self.policy.total_attempts();
        warn!(attempts, ?last_status, "generateContent retries exhausted");
        Err(TransportError::RetriesExhausted {
            attempts,
            last_status,
        })
    }
}
