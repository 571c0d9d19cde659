//! Tests for the Gemini transport
//!
//! Unit tests for the pure pieces live next to their modules; the tests here
//! drive `GeminiClient` against a WireMock server.
