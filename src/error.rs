//! Error types for SDK configuration.
//!
//! This module contains error types used for configuration and validation
//! failures at SDK initialization time.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use vendure_api::{EndpointUrl, ConfigError};
//!
//! let result = EndpointUrl::new("not-a-url");
//! assert!(matches!(result, Err(ConfigError::InvalidEndpointUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The GraphQL endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide an absolute http(s) URL (e.g., 'https://shop.example.com/shop-api').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Channel token cannot be empty.
    #[error("Channel token cannot be empty. Omit it entirely to use the default channel.")]
    EmptyChannelToken,

    /// The language code is invalid.
    #[error("Invalid language code '{code}'. Expected an ISO 639-1 code, optionally with region (e.g., 'en' or 'pt-BR').")]
    InvalidLanguageCode {
        /// The invalid code that was provided.
        code: String,
    },

    /// The custom auth header name is invalid.
    #[error("Invalid auth header name '{name}'. Header names must be non-empty ASCII without whitespace.")]
    InvalidAuthHeaderName {
        /// The invalid header name that was provided.
        name: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_endpoint_url_error_message() {
        let error = ConfigError::InvalidEndpointUrl {
            url: "ftp://wrong".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ftp://wrong"));
        assert!(message.contains("http(s) URL"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "endpoint" };
        let message = error.to_string();
        assert!(message.contains("endpoint"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_language_code_error_message() {
        let error = ConfigError::InvalidLanguageCode {
            code: "12!".to_string(),
        };
        assert!(error.to_string().contains("12!"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyChannelToken;
        let _: &dyn std::error::Error = &error;
    }
}
