//! Product catalogue HTTP client.
//!
//! Thin wrapper over `reqwest` for the two catalogue endpoints. Every failure is
//! reported as an [`ApiError`]; callers decide how to surface it.

use reqwest::header::ACCEPT;
use reqwest::Response;

use crate::models::{NewProduct, Product};
use crate::util::{compact_text, is_http_url, normalize_text_option};
use crate::{ApiError, Error, Result};

/// Collection endpoint, relative to the API base URL.
pub const PRODUCTS_PATH: &str = "v1/products/";

const JSON_MIME: &str = "application/json";

/// HTTP client for the product catalogue.
#[derive(Debug, Clone)]
pub struct ProductApi {
    base_url: String,
    client: reqwest::Client,
}

impl ProductApi {
    /// Builds a client for an explicit API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(ApiError::from)?;
        Ok(Self { base_url, client })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of the product collection.
    pub fn products_url(&self) -> String {
        join_url(&self.base_url, PRODUCTS_PATH)
    }

    /// Fetches the product collection in server order.
    ///
    /// A body that is valid JSON but not an array yields an empty list.
    pub async fn list_products(&self) -> std::result::Result<Vec<Product>, ApiError> {
        let url = self.products_url();
        tracing::debug!(%url, "Fetching product list");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, JSON_MIME)
            .send()
            .await?;
        let body = read_success_body(response).await?;
        decode_product_list(&body)
    }

    /// Creates a product.
    ///
    /// Returns the created product when the response body matches the product
    /// shape, `None` otherwise.
    pub async fn create_product(
        &self,
        draft: &NewProduct,
    ) -> std::result::Result<Option<Product>, ApiError> {
        let url = self.products_url();
        tracing::debug!(%url, name = %draft.name, "Creating product");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, JSON_MIME)
            .json(draft)
            .send()
            .await?;
        let body = read_success_body(response).await?;
        Ok(decode_created_product(&body))
    }
}

/// Joins a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn read_success_body(response: Response) -> std::result::Result<String, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Product API request failed");
        return Err(ApiError::Http {
            status: status.as_u16(),
            body: compact_text(&body),
        });
    }
    Ok(response.text().await?)
}

fn decode_product_list(body: &str) -> std::result::Result<Vec<Product>, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|error| ApiError::Decode(format!("product list is not JSON: {error}")))?;

    if !value.is_array() {
        tracing::warn!("Product list response was not a JSON array; treating as empty");
        return Ok(Vec::new());
    }

    serde_json::from_value(value)
        .map_err(|error| ApiError::Decode(format!("invalid product in list: {error}")))
}

fn decode_created_product(body: &str) -> Option<Product> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Product>(body) {
        Ok(product) => Some(product),
        Err(error) => {
            tracing::warn!("Create response did not match the product shape: {}", error);
            None
        }
    }
}

fn normalize_base_url(raw: String) -> Result<String> {
    let base = normalize_text_option(Some(raw))
        .ok_or_else(|| Error::Config("API base URL must not be empty".to_string()))?;
    if !is_http_url(&base) {
        return Err(Error::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}
