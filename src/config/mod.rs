//! Configuration types for the Vendure API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for GraphQL communication with a Vendure server.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`VendureConfig`]: The main configuration struct holding all SDK settings
//! - [`VendureConfigBuilder`]: A builder for constructing [`VendureConfig`] instances
//! - [`EndpointUrl`]: A validated GraphQL endpoint URL newtype
//! - [`ChannelToken`]: A validated channel token with masked debug output
//! - [`LanguageCode`]: A validated language code for localized responses
//! - [`AuthHeaderScheme`]: How the session token is attached to requests
//!
//! # Example
//!
//! ```rust
//! use vendure_api::{VendureConfig, EndpointUrl, ChannelToken};
//!
//! let config = VendureConfig::builder()
//!     .endpoint(EndpointUrl::new("https://shop.example.com/shop-api").unwrap())
//!     .channel_token(ChannelToken::new("eu-channel").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ChannelToken, EndpointUrl, LanguageCode};

use crate::error::ConfigError;
use std::time::Duration;

/// Default per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP header name carrying the channel token.
pub const CHANNEL_TOKEN_HEADER: &str = "vendure-token";

/// How the session token is attached to outgoing requests.
///
/// Vendure deployments differ in how they expect the credential: the default
/// bearer-token strategy uses the standard `Authorization` header, while
/// cookie-less session setups often use a dedicated header.
///
/// # Example
///
/// ```rust
/// use vendure_api::AuthHeaderScheme;
///
/// let bearer = AuthHeaderScheme::Bearer;
/// assert_eq!(bearer.header_for("abc"), ("Authorization".to_string(), "Bearer abc".to_string()));
///
/// let custom = AuthHeaderScheme::header("vendure-auth-token").unwrap();
/// assert_eq!(custom.header_for("abc"), ("vendure-auth-token".to_string(), "abc".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthHeaderScheme {
    /// `Authorization: Bearer <token>` (Vendure's default bearer strategy).
    Bearer,
    /// A named header carrying the raw token value.
    Header(String),
}

impl AuthHeaderScheme {
    /// Creates a custom header scheme with a validated header name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAuthHeaderName`] if the name is empty or
    /// contains non-ASCII characters or whitespace.
    pub fn header(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii() && !c.is_ascii_whitespace());
        if !valid {
            return Err(ConfigError::InvalidAuthHeaderName { name });
        }
        Ok(Self::Header(name))
    }

    /// Returns the `(name, value)` header pair for the given token.
    #[must_use]
    pub fn header_for(&self, token: &str) -> (String, String) {
        match self {
            Self::Bearer => ("Authorization".to_string(), format!("Bearer {token}")),
            Self::Header(name) => (name.clone(), token.to_string()),
        }
    }
}

impl Default for AuthHeaderScheme {
    fn default() -> Self {
        Self::Bearer
    }
}

/// Configuration for the Vendure API SDK.
///
/// This struct holds all configuration needed for SDK operations: the GraphQL
/// endpoint, channel and language selection, the auth header scheme, and the
/// per-request timeout.
///
/// # Thread Safety
///
/// `VendureConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks. There is no process-wide configuration;
/// each client owns its config instance.
///
/// # Example
///
/// ```rust
/// use vendure_api::{VendureConfig, EndpointUrl, LanguageCode};
/// use std::time::Duration;
///
/// let config = VendureConfig::builder()
///     .endpoint(EndpointUrl::new("https://shop.example.com/shop-api").unwrap())
///     .language_code(LanguageCode::new("de").unwrap())
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.timeout(), Duration::from_secs(10));
/// ```
#[derive(Clone, Debug)]
pub struct VendureConfig {
    endpoint: EndpointUrl,
    channel_token: Option<ChannelToken>,
    language_code: Option<LanguageCode>,
    auth_header: AuthHeaderScheme,
    timeout: Duration,
    user_agent_prefix: Option<String>,
}

impl VendureConfig {
    /// Creates a new builder for constructing a `VendureConfig`.
    #[must_use]
    pub fn builder() -> VendureConfigBuilder {
        VendureConfigBuilder::new()
    }

    /// Returns the GraphQL endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    /// Returns the channel token, if configured.
    #[must_use]
    pub const fn channel_token(&self) -> Option<&ChannelToken> {
        self.channel_token.as_ref()
    }

    /// Returns the language code, if configured.
    #[must_use]
    pub const fn language_code(&self) -> Option<&LanguageCode> {
        self.language_code.as_ref()
    }

    /// Returns the auth header scheme.
    #[must_use]
    pub const fn auth_header(&self) -> &AuthHeaderScheme {
        &self.auth_header
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify VendureConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VendureConfig>();
};

/// Builder for constructing [`VendureConfig`] instances.
///
/// The only required field is `endpoint`. All other fields have sensible
/// defaults.
///
/// # Defaults
///
/// - `channel_token`: `None` (default channel)
/// - `language_code`: `None` (server default language)
/// - `auth_header`: [`AuthHeaderScheme::Bearer`]
/// - `timeout`: 30 seconds
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct VendureConfigBuilder {
    endpoint: Option<EndpointUrl>,
    channel_token: Option<ChannelToken>,
    language_code: Option<LanguageCode>,
    auth_header: Option<AuthHeaderScheme>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl VendureConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint URL (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: EndpointUrl) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the channel token sent in the `vendure-token` header.
    #[must_use]
    pub fn channel_token(mut self, token: ChannelToken) -> Self {
        self.channel_token = Some(token);
        self
    }

    /// Sets the language code sent as the `languageCode` query parameter.
    #[must_use]
    pub fn language_code(mut self, code: LanguageCode) -> Self {
        self.language_code = Some(code);
        self
    }

    /// Sets the auth header scheme used to attach session tokens.
    #[must_use]
    pub fn auth_header(mut self, scheme: AuthHeaderScheme) -> Self {
        self.auth_header = Some(scheme);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`VendureConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `endpoint` is not set.
    pub fn build(self) -> Result<VendureConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;

        Ok(VendureConfig {
            endpoint,
            channel_token: self.channel_token,
            language_code: self.language_code,
            auth_header: self.auth_header.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
