//! Client configuration baked in at build time.
//!
//! The mobile build script serializes a [`ClientConfig`] into `OUT_DIR`; the
//! app parses it at startup and resolves the API base URL from it.

use serde::{Deserialize, Serialize};

use crate::util::{is_http_url, normalize_text_option};
use crate::{Error, Result};

/// API base URL used when the build does not override it.
pub const DEFAULT_API_BASE_URL: &str = "https://tickshop.example.com/api/";

/// Build-provisioned client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
}

impl ClientConfig {
    /// Returns the configured API base URL, falling back to
    /// [`DEFAULT_API_BASE_URL`] when unset or blank.
    pub fn api_base_url(&self) -> Result<String> {
        let Some(url) = normalize_text_option(self.api_base_url.clone()) else {
            return Ok(DEFAULT_API_BASE_URL.to_string());
        };
        if !is_http_url(&url) {
            return Err(Error::Config(format!(
                "api_base_url must include http:// or https:// (got {url})"
            )));
        }
        Ok(url)
    }
}

/// Parse the generated configuration JSON.
pub fn parse_client_config(raw: &str) -> Result<ClientConfig> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_default_base_url() {
        let config = parse_client_config("{}").unwrap();
        assert_eq!(config.api_base_url().unwrap(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn blank_override_uses_default_base_url() {
        let config = ClientConfig {
            api_base_url: Some("   ".to_string()),
        };
        assert_eq!(config.api_base_url().unwrap(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn override_is_trimmed() {
        let config =
            parse_client_config(r#"{"api_base_url": " http://10.0.2.2:8000/ "}"#).unwrap();
        assert_eq!(config.api_base_url().unwrap(), "http://10.0.2.2:8000/");
    }

    #[test]
    fn override_without_scheme_is_rejected() {
        let config = ClientConfig {
            api_base_url: Some("api.example.com".to_string()),
        };
        assert!(matches!(config.api_base_url(), Err(Error::Config(_))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = parse_client_config(r#"{"api_base_url": null, "extra": 1}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }
}
