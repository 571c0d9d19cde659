//! config-rs/lib.rs
//! Shared configuration utilities for the form validator workspace
//! Provides configuration providers plus standardized port/address helpers

use std::env;
use std::net::{Ipv4Addr, SocketAddr};

pub mod provider;

pub use provider::{
    ConfigError, ConfigProvider, ConfigProviderExt, EnvConfigProvider, MapConfigProvider,
};

/// Load variables from a `.env` file into the process environment, if one exists.
///
/// Returns `true` when a file was found and loaded.
pub fn load_dotenv() -> bool {
    match dotenv::dotenv() {
        Ok(path) => {
            log::debug!("Loaded environment from {}", path.display());
            true
        }
        Err(_) => false,
    }
}

/// Get service port from environment variables with proper fallback
///
/// # Arguments
/// * `service_name` - The name of the service (e.g., "FORM_VALIDATOR")
/// * `default_port` - The default port to use if not specified in environment
///
/// # Returns
/// The port number to use for the service
pub fn get_service_port(service_name: &str, default_port: u16) -> u16 {
    let var_name = format!("{}_SERVICE_PORT", service_name.to_uppercase());
    match env::var(&var_name) {
        Ok(value) => value.trim().parse::<u16>().unwrap_or_else(|_| {
            log::warn!("Invalid port in {}, using default {}", var_name, default_port);
            default_port
        }),
        Err(_) => default_port,
    }
}

/// Create a SocketAddr for binding a service
///
/// `{SERVICE}_SERVICE_ADDR` wins when it holds a socket address, optionally
/// prefixed with `http://` or `https://`. Otherwise the service binds on all
/// interfaces at the port from [`get_service_port`].
pub fn get_bind_address(service_name: &str, default_port: u16) -> SocketAddr {
    let var_name = format!("{}_SERVICE_ADDR", service_name.to_uppercase());

    if let Ok(addr_str) = env::var(&var_name) {
        let trimmed = addr_str
            .trim()
            .trim_start_matches("http://")
            .trim_start_matches("https://");
        match trimmed.parse::<SocketAddr>() {
            Ok(addr) => return addr,
            Err(_) => log::warn!("Invalid address format in {}, using default", var_name),
        }
    }

    let port = get_service_port(service_name, default_port);
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
}
