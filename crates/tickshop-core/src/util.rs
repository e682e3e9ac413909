//! Shared utility functions used across multiple modules.

/// Maximum number of characters of a response body kept in error messages.
pub const ERROR_SNIPPET_LIMIT: usize = 300;

/// Message shown when a failure carries no text of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most [`ERROR_SNIPPET_LIMIT`] characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(ERROR_SNIPPET_LIMIT).collect()
}

/// Render an error for display, substituting a fallback for empty messages.
pub fn display_error(error: &impl std::fmt::Display) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
