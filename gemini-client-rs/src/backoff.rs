//! Retry schedule for the Gemini transport
//!
//! Wait before the next attempt, by failure kind:
//! 1. 429 / 503: a `retry in <seconds>s` hint in the body, else a numeric
//!    `Retry-After` header (seconds), else `base * 2^attempt + jitter`
//! 2. Timeout: `base * 2^attempt`, no jitter
//! 3. Other network failures: `base * 2^attempt + jitter`

use std::time::Duration;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use reqwest::header::{HeaderMap, RETRY_AFTER};

pub const MAX_RETRIES: u32 = 3;
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const BASE_DELAY: Duration = Duration::from_millis(1_000);
pub const MAX_JITTER: Duration = Duration::from_millis(300);

static RETRY_HINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)retry in\s+(\d+(?:\.\d+)?)\s*s").expect("Invalid retry hint pattern")
});

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts is `max_retries + 1`
    pub max_retries: u32,

    /// Deadline for a single attempt, response body included
    pub attempt_timeout: Duration,

    /// Base of the exponential schedule
    pub base_delay: Duration,

    /// Upper bound (exclusive) of the random jitter
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            attempt_timeout: ATTEMPT_TIMEOUT,
            base_delay: BASE_DELAY,
            max_jitter: MAX_JITTER,
        }
    }
}

impl RetryPolicy {
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// `base * 2^attempt`
    pub fn exponential_delay(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// `base * 2^attempt + random(0..max_jitter)`
    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        self.exponential_delay(attempt) + self.jitter()
    }

    /// Wait after a 429 or 503 response
    pub fn rate_limit_delay(&self, body: &str, headers: &HeaderMap, attempt: u32) -> Duration {
        parse_retry_hint(body)
            .or_else(|| parse_retry_after(headers))
            .unwrap_or_else(|| self.jittered_delay(attempt))
    }

    fn jitter(&self) -> Duration {
        let max_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
    }
}

/// Parse a natural-language `retry in 5.5s` hint from a response body
pub fn parse_retry_hint(body: &str) -> Option<Duration> {
    let captures = RETRY_HINT.captures(body)?;
    let seconds = captures.get(1)?.as_str().parse::<f64>().ok()?;
    seconds_to_duration(seconds)
}

/// Parse a numeric `Retry-After` header (seconds). HTTP-date values are ignored.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    let seconds = value.trim().parse::<f64>().ok()?;
    seconds_to_duration(seconds)
}

fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(seconds).ok()
}
