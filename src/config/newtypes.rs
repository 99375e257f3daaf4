//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear
//! error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated GraphQL endpoint URL.
///
/// This newtype ensures the endpoint is an absolute `http` or `https` URL,
/// providing type safety to prevent accidental misuse of raw strings.
///
/// # Example
///
/// ```rust
/// use vendure_api::EndpointUrl;
///
/// let endpoint = EndpointUrl::new("https://shop.example.com/shop-api").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://shop.example.com/shop-api");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl(String);

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// Trailing slashes are stripped so that the stored form is canonical.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the value is not an
    /// absolute `http` or `https` URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let parsed = reqwest::Url::parse(&url)
            .map_err(|_| ConfigError::InvalidEndpointUrl { url: url.clone() })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidEndpointUrl { url });
        }
        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidEndpointUrl { url });
        }
        Ok(Self(url.trim_end_matches('/').to_string()))
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated Vendure channel token.
///
/// Channel tokens select which sales channel a request operates on. They are
/// sent in the `vendure-token` header. The value is masked in debug output to
/// keep it out of logs.
///
/// # Example
///
/// ```rust
/// use vendure_api::ChannelToken;
///
/// let token = ChannelToken::new("eu-channel").unwrap();
/// assert_eq!(token.as_ref(), "eu-channel");
/// assert_eq!(format!("{:?}", token), "ChannelToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ChannelToken(String);

impl ChannelToken {
    /// Creates a new validated channel token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyChannelToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyChannelToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for ChannelToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ChannelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChannelToken(*****)")
    }
}

/// A validated language code.
///
/// Vendure accepts an ISO 639-1 language code, optionally with a region
/// subtag, as the `languageCode` query parameter (e.g., `en`, `de`, `pt-BR`,
/// `zh-Hans`). Validation here is shape-only; the server decides which codes
/// it actually supports.
///
/// # Example
///
/// ```rust
/// use vendure_api::LanguageCode;
///
/// let code = LanguageCode::new("pt-BR").unwrap();
/// assert_eq!(code.as_ref(), "pt-BR");
///
/// assert!(LanguageCode::new("").is_err());
/// assert!(LanguageCode::new("en us").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Creates a new validated language code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLanguageCode`] if the code is empty or
    /// contains characters other than ASCII letters and `-`.
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into();
        let valid = !code.is_empty()
            && code.len() <= 8
            && code.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
        if !valid {
            return Err(ConfigError::InvalidLanguageCode { code });
        }
        Ok(Self(code))
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
