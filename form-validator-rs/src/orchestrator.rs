//! Request orchestration for the form validator
//!
//! Validates the inbound body, serves the canned result in mock mode, and
//! otherwise sends the composed instruction through the transport and
//! interprets the reply.

use std::sync::Arc;

use config_rs::ConfigProvider;
use gemini_client::GenerationTransport;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::ValidatorError;
use crate::extract::parse_reply;
use crate::prompt::build_instruction;
use crate::result::ParsedResult;
use crate::settings::{ValidatorSettings, API_KEY_VARS};

pub struct FormValidator {
    transport: Arc<dyn GenerationTransport>,
    config: Arc<dyn ConfigProvider>,
}

impl FormValidator {
    pub fn new(transport: Arc<dyn GenerationTransport>, config: Arc<dyn ConfigProvider>) -> Self {
        Self { transport, config }
    }

    /// Settings as they stand right now
    pub fn settings(&self) -> ValidatorSettings {
        ValidatorSettings::load(self.config.as_ref())
    }

    /// Handle one `{ "prompt": string }` request body
    ///
    /// # Returns
    /// * `Ok(ParsedResult)` - the object extracted from the model reply, or
    ///   the canned result in mock mode
    /// * `Err(ValidatorError)` - exactly one terminal error otherwise
    pub async fn handle(&self, body: &Value) -> Result<ParsedResult, ValidatorError> {
        let form_definition = extract_prompt(body)?;
        let settings = self.settings();

        if settings.mock_mode {
            info!("Mock mode enabled, returning canned suggestions");
            return Ok(ParsedResult::canned());
        }

        let Some(credential) = settings.api_key else {
            error!(
                "No API key configured; set one of {} to call the generation endpoint",
                API_KEY_VARS.join(" or ")
            );
            return Err(ValidatorError::MissingCredential);
        };

        let instruction = build_instruction(form_definition);
        let raw = self
            .transport
            .send(&instruction, &credential)
            .await
            .map_err(|err| {
                warn!(error = %err, "Generation request failed");
                ValidatorError::from(err)
            })?;

        parse_reply(&raw)
    }
}

/// The `prompt` field, present and a non-empty string
fn extract_prompt(body: &Value) -> Result<&str, ValidatorError> {
    body.get("prompt")
        .and_then(Value::as_str)
        .filter(|prompt| !prompt.is_empty())
        .ok_or(ValidatorError::InvalidInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::SYSTEM_INSTRUCTION;
    use crate::result::Category;
    use async_trait::async_trait;
    use config_rs::MapConfigProvider;
    use gemini_client::TransportError;
    use mockall::mock;
    use serde_json::json;

    mock! {
        pub Transport {}

        #[async_trait]
        impl GenerationTransport for Transport {
            async fn send(&self, prompt: &str, credential: &str) -> Result<String, TransportError>;
        }
    }

    fn configured() -> MapConfigProvider {
        MapConfigProvider::new().with("GEMINI_API_KEY", "test-key")
    }

    fn validator(transport: MockTransport, config: MapConfigProvider) -> FormValidator {
        FormValidator::new(Arc::new(transport), Arc::new(config))
    }

    fn envelope(text: &str) -> String {
        json!({ "candidates": [ { "content": { "parts": [ { "text": text } ] } } ] }).to_string()
    }

    #[tokio::test]
    async fn test_invalid_prompt_never_reaches_transport() {
        for body in [
            json!({}),
            json!({ "prompt": 42 }),
            json!({ "prompt": null }),
            json!({ "prompt": ["a"] }),
            json!({ "prompt": "" }),
            json!("just a string"),
        ] {
            let mut transport = MockTransport::new();
            transport.expect_send().never();

            let result = validator(transport, configured()).handle(&body).await;
            assert!(
                matches!(result, Err(ValidatorError::InvalidInput)),
                "body {body} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_mock_mode_skips_transport() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();

        let config = MapConfigProvider::new().with("USE_MOCK_AI", "true");
        let result = validator(transport, config)
            .handle(&json!({ "prompt": "anything at all" }))
            .await
            .unwrap();

        assert_eq!(result, ParsedResult::canned());
    }

    #[tokio::test]
    async fn test_missing_credential_is_misconfiguration() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();

        let result = validator(transport, MapConfigProvider::new())
            .handle(&json!({ "prompt": "form" }))
            .await;

        assert!(matches!(result, Err(ValidatorError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_sends_instruction_and_parses_reply() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|prompt, credential| {
                let prompt: &str = prompt;
                let credential: &str = credential;
                prompt.starts_with(SYSTEM_INSTRUCTION)
                    && prompt.ends_with("<form id=\"signup\"></form>")
                    && credential == "test-key"
            })
            .times(1)
            .returning(|_, _| {
                Ok(envelope(
                    "Here you go: {\"validationRules\":[\"email required\"],\"edgeCases\":[\"+ in email\"]}",
                ))
            });

        let result = validator(transport, configured())
            .handle(&json!({ "prompt": "<form id=\"signup\"></form>" }))
            .await
            .unwrap();

        assert_eq!(result.items(Category::ValidationRules), vec!["email required"]);
        assert_eq!(result.items(Category::EdgeCases), vec!["+ in email"]);
        assert!(result.items(Category::Accessibility).is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_reply() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_, _| Ok(envelope("I can't produce JSON today.")));

        let result = validator(transport, configured())
            .handle(&json!({ "prompt": "form" }))
            .await;

        match result {
            Err(ValidatorError::InvalidResponseFormat { raw }) => {
                assert_eq!(raw, "I can't produce JSON today.")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    async fn handle_with_failure(err: TransportError) -> ValidatorError {
        let mut transport = MockTransport::new();
        let mut pending = Some(err);
        transport
            .expect_send()
            .times(1)
            .returning(move |_, _| Err(pending.take().expect("send called twice")));

        validator(transport, configured())
            .handle(&json!({ "prompt": "form" }))
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn test_transport_errors_are_classified() {
        let timeout = handle_with_failure(TransportError::Timeout { attempts: 4 }).await;
        assert!(matches!(timeout, ValidatorError::Timeout));

        let upstream = handle_with_failure(TransportError::Upstream {
            status: 403,
            body: "denied".to_string(),
        })
        .await;
        match upstream {
            ValidatorError::Upstream { details } => {
                assert_eq!(details, "Gemini API error 403: denied")
            }
            other => panic!("unexpected: {other:?}"),
        }

        let exhausted = handle_with_failure(TransportError::RetriesExhausted {
            attempts: 4,
            last_status: Some(429),
        })
        .await;
        assert!(matches!(exhausted, ValidatorError::Internal(_)));
    }
}
