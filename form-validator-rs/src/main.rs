// form-validator-rs/src/main.rs
// HTTP entry point for form validation suggestions
// Port 3000 by default, override with FORM_VALIDATOR_SERVICE_PORT or FORM_VALIDATOR_SERVICE_ADDR

use std::sync::Arc;

use config_rs::{get_bind_address, load_dotenv, EnvConfigProvider};
use form_validator::{create_router, AppState, ValidatorSettings};
use gemini_client::{GeminiClient, GeminiConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    let config = Arc::new(EnvConfigProvider::new());

    let gemini_config = GeminiConfig::from_provider(config.as_ref());
    info!(
        base_url = %gemini_config.base_url,
        model = %gemini_config.model,
        "Using generation endpoint"
    );
    let client = GeminiClient::new(gemini_config)?;

    let settings = ValidatorSettings::load(config.as_ref());
    if settings.mock_mode {
        warn!("USE_MOCK_AI is set, every request gets the canned suggestions");
    } else if settings.api_key.is_none() {
        warn!("No Gemini API key configured, requests will fail until one is set");
    }

    let state = Arc::new(AppState::new(Arc::new(client), config));
    let app = create_router(state);

    let addr = get_bind_address("FORM_VALIDATOR", 3000);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Form validator listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
