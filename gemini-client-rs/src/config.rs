//! Endpoint configuration for the Gemini client
//!
//! Reads:
//! - GEMINI_API_BASE_URL: API host (defaults to the public Generative Language API)
//! - GEMINI_MODEL: model name placed in the request path

use config_rs::{ConfigProvider, ConfigProviderExt};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn from_provider(provider: &dyn ConfigProvider) -> Self {
        Self {
            base_url: provider.get_string_or("GEMINI_API_BASE_URL", DEFAULT_BASE_URL),
            model: provider.get_string_or("GEMINI_MODEL", DEFAULT_MODEL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Endpoint URL without the credential query parameter
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}
