//! Reply interpretation
//!
//! The transport hands back the raw endpoint body. The model's reply is taken
//! from the envelope when the body is one, otherwise the body itself is the
//! reply. The JSON object is then cut out of the reply by a greedy scan from
//! the first `{` to the last `}`.
//!
//! The greedy scan breaks on replies holding several separate objects or
//! stray braces in surrounding prose. Callers rely on this exact behaviour,
//! so it is kept as-is.

use gemini_client::GenerateContentResponse;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ValidatorError;
use crate::result::ParsedResult;

/// The model's reply text inside `raw`
pub fn reply_text(raw: &str) -> String {
    match serde_json::from_str::<GenerateContentResponse>(raw) {
        Ok(envelope) => match envelope.first_candidate_text() {
            Some(text) => text.to_string(),
            None => {
                debug!("Response envelope has no candidate text, using raw body");
                raw.to_string()
            }
        },
        Err(_) => raw.to_string(),
    }
}

/// Substring from the first `{` to the last `}`, inclusive
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    text.get(start..=end)
}

/// Turn a raw endpoint body into a [`ParsedResult`]
pub fn parse_reply(raw: &str) -> Result<ParsedResult, ValidatorError> {
    let reply = reply_text(raw);

    let Some(block) = extract_json_block(&reply) else {
        warn!(reply_chars = reply.len(), "Model reply contains no JSON object");
        return Err(ValidatorError::InvalidResponseFormat { raw: reply });
    };

    match serde_json::from_str::<Value>(block) {
        Ok(value) => Ok(ParsedResult::from_value(value)),
        Err(err) => {
            warn!(error = %err, "Model reply JSON failed to parse");
            Err(ValidatorError::InvalidResponseFormat { raw: reply })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Category;
    use serde_json::json;

    #[test]
    fn test_extracts_object_between_prose() {
        let text = "preamble {\"validationRules\":[\"a\"]} trailing";
        assert_eq!(
            extract_json_block(text),
            Some("{\"validationRules\":[\"a\"]}")
        );

        let result = parse_reply(text).unwrap();
        assert_eq!(result.as_value(), &json!({ "validationRules": ["a"] }));
    }

    #[test]
    fn test_scan_is_greedy() {
        let text = "first {\"a\":1} then {\"b\":2} end";
        assert_eq!(extract_json_block(text), Some("{\"a\":1} then {\"b\":2}"));
        // Two fragments do not form valid JSON
        assert!(matches!(
            parse_reply(text),
            Err(ValidatorError::InvalidResponseFormat { .. })
        ));
    }

    #[test]
    fn test_no_braces() {
        assert_eq!(extract_json_block("no json at all"), None);
        assert_eq!(extract_json_block("} backwards {"), None);

        match parse_reply("no json at all") {
            Err(ValidatorError::InvalidResponseFormat { raw }) => assert_eq!(raw, "no json at all"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_reply_taken_from_envelope() {
        let inner = "```json\n{\"edgeCases\":[\"empty string\"],\"accessibility\":[]}\n```";
        let raw = json!({
            "candidates": [ { "content": { "parts": [ { "text": inner } ] } } ]
        })
        .to_string();

        assert_eq!(reply_text(&raw), inner);
        let result = parse_reply(&raw).unwrap();
        assert_eq!(result.items(Category::EdgeCases), vec!["empty string"]);
        assert!(result.items(Category::ValidationRules).is_empty());
    }

    #[test]
    fn test_envelope_without_text_uses_raw_body() {
        // Parses as an envelope but has no candidate text, so the body itself
        // is scanned
        let raw = "{\"uxSuggestions\":[\"inline errors\"]}";
        assert_eq!(reply_text(raw), raw);
        let result = parse_reply(raw).unwrap();
        assert_eq!(result.items(Category::UxSuggestions), vec!["inline errors"]);
    }

    #[test]
    fn test_invalid_format_reports_model_reply() {
        let raw = json!({
            "candidates": [ { "content": { "parts": [ { "text": "Sorry, I cannot help." } ] } } ]
        })
        .to_string();
        match parse_reply(&raw) {
            Err(ValidatorError::InvalidResponseFormat { raw }) => {
                assert_eq!(raw, "Sorry, I cannot help.")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
