//! # Gemini Client
//!
//! Transport for the Gemini `generateContent` endpoint.
//!
//! This crate provides:
//!
//! - `GenerationTransport`: the seam the form validator calls through
//! - `GeminiClient`: one logical call with bounded attempts, a per-attempt
//!   timeout and backoff between retries
//! - `RetryPolicy`: the retry schedule, including `Retry-After` and
//!   "retry in Ns" hint handling
//! - Request/response envelope models for the endpoint
//!
//! The client returns the raw response body text on success. Interpreting
//! that text is left to the caller.

pub mod backoff;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;

pub use backoff::RetryPolicy;
pub use client::{AttemptOutcome, GeminiClient};
pub use config::GeminiConfig;
pub use error::{Result, TransportError};
pub use models::{GenerateContentRequest, GenerateContentResponse};
pub use transport::GenerationTransport;

#[cfg(test)]
mod tests;
