//! Per-request settings
//!
//! Reads:
//! - USE_MOCK_AI: return the canned result without calling the model
//! - GEMINI_API_KEY, then GOOGLE_API_KEY: credential, first non-empty wins

use std::fmt;

use config_rs::{ConfigProvider, ConfigProviderExt};

pub const MOCK_MODE_KEY: &str = "USE_MOCK_AI";
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Clone, PartialEq, Eq)]
pub struct ValidatorSettings {
    pub mock_mode: bool,
    pub api_key: Option<String>,
}

impl ValidatorSettings {
    pub fn load(provider: &dyn ConfigProvider) -> Self {
        Self {
            mock_mode: provider.get_bool_or(MOCK_MODE_KEY, false),
            api_key: provider.get_first(&API_KEY_VARS),
        }
    }
}

// Keeps the credential out of logs
impl fmt::Debug for ValidatorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorSettings")
            .field("mock_mode", &self.mock_mode)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
