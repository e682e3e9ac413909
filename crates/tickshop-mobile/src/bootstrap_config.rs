//! Mobile bootstrap configuration loaded from generated JSON.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use tickshop_core::api::ProductApi;
use tickshop_core::config::{parse_client_config, ClientConfig};
use tickshop_core::Result;

const GENERATED_CONFIG: &str = include_str!(concat!(env!("OUT_DIR"), "/mobile-bootstrap.json"));

/// Loads the build-time configuration.
///
/// A malformed file falls back to defaults so the app still starts.
pub fn load_bootstrap_config() -> ClientConfig {
    load_bootstrap_config_from(GENERATED_CONFIG)
}

fn load_bootstrap_config_from(raw: &str) -> ClientConfig {
    parse_client_config(raw).unwrap_or_else(|error| {
        tracing::warn!("Failed to parse mobile bootstrap config: {}", error);
        ClientConfig::default()
    })
}

/// Builds the product API client from the bootstrap configuration.
pub fn product_api(config: &ClientConfig) -> Result<ProductApi> {
    let base_url = config.api_base_url()?;
    tracing::info!(%base_url, "Using product API");
    ProductApi::new(base_url)
}
