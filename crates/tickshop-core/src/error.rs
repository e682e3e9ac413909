//! Error types for tickshop-core

use thiserror::Error;

/// Result type alias using tickshop-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tickshop-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Product API error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Notification delivery error
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures raised by the product HTTP API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("Invalid response payload: {0}")]
    Decode(String),
}

/// Failures raised while delivering local notifications.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The user (or platform) has not granted notification permission.
    #[error("Notification permission not granted")]
    PermissionDenied,

    /// The platform notification service rejected the request.
    #[error("Notification backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_includes_status_and_body() {
        let error = ApiError::Http {
            status: 500,
            body: "server error".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 500: server error");
    }

    #[test]
    fn api_error_is_transparent_inside_core_error() {
        let error = Error::from(ApiError::Decode("expected array".to_string()));
        assert_eq!(error.to_string(), "Invalid response payload: expected array");
    }
}
