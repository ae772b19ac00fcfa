// src/error.rs

//! Unified error handling for the review client.

use std::fmt;

use thiserror::Error;

/// Result type alias for review client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// A field the record cannot exist without was not found on the page
    #[error("Missing essential field '{field}' at {url}")]
    MissingField { field: &'static str, url: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a missing essential field error.
    pub fn missing_field(field: &'static str, url: impl Into<String>) -> Self {
        Self::MissingField {
            field,
            url: url.into(),
        }
    }

    /// Create a non-success status error.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error means the page itself lacked a required field.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_field() {
        let err = AppError::missing_field("content", "https://example.com/r/1");
        assert!(err.is_missing_field());
        assert_eq!(
            err.to_string(),
            "Missing essential field 'content' at https://example.com/r/1"
        );
    }

    #[test]
    fn test_status_message() {
        let err = AppError::status("https://example.com", 503);
        assert_eq!(err.to_string(), "HTTP status 503 for https://example.com");
        assert!(!err.is_missing_field());
    }
}
