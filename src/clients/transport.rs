//! HTTP transport for GraphQL operations.
//!
//! This module provides the [`GraphqlTransport`] type, which turns an
//! operation string and variables into a single HTTP POST against the
//! configured endpoint and parses the `{data, errors}` envelope that comes
//! back. One attempt per call; retries and backoff are deliberately left to
//! the embedding application.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::envelope::GraphqlEnvelope;
use crate::clients::errors::GraphqlClientError;
use crate::config::{VendureConfig, CHANNEL_TOKEN_HEADER};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stateless-per-call HTTP transport for GraphQL operations.
///
/// The transport handles:
/// - POST body construction (`{"query", "variables"?, "operationName"?}`,
///   absent keys omitted rather than null)
/// - Default headers (User-Agent, Accept, channel token) merged under
///   caller-supplied headers
/// - The `languageCode` query parameter, when configured
/// - Envelope parsing, with server-reported errors short-circuiting
///
/// # Thread Safety
///
/// `GraphqlTransport` is `Send + Sync`; the underlying connection pool is
/// shared across any number of concurrent operations, with no ordering
/// between them.
#[derive(Debug)]
pub struct GraphqlTransport {
    /// The internal reqwest HTTP client (owns the connection pool).
    client: reqwest::Client,
    /// Absolute endpoint URL.
    endpoint: String,
    /// Headers applied to every request, overridable per call.
    default_headers: HashMap<String, String>,
    /// Optional `languageCode` query parameter value.
    language_code: Option<String>,
}

// Verify GraphqlTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlTransport>();
};

impl GraphqlTransport {
    /// Creates a new transport from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &VendureConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Vendure API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Content-Type".to_string(),
            "application/json".to_string(),
        );
        if let Some(channel_token) = config.channel_token() {
            default_headers.insert(
                CHANNEL_TOKEN_HEADER.to_string(),
                channel_token.as_ref().to_string(),
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.endpoint().as_ref().to_string(),
            default_headers,
            language_code: config.language_code().map(|c| c.as_ref().to_string()),
        }
    }

    /// Returns the endpoint URL for this transport.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the default headers applied to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Executes one GraphQL operation and returns the parsed envelope.
    ///
    /// # Arguments
    ///
    /// * `operation` - The GraphQL operation text (query or mutation)
    /// * `variables` - Optional variables object; omitted from the body when `None`
    /// * `operation_name` - Optional operation name for multi-operation documents
    /// * `extra_headers` - Per-call headers merged over the defaults
    ///
    /// # Errors
    ///
    /// - [`GraphqlClientError::Network`] for transport failures
    /// - [`GraphqlClientError::Http`] for non-2xx responses (no retry)
    /// - [`GraphqlClientError::Decode`] when the body is not a valid envelope
    /// - [`GraphqlClientError::Graphql`] when the envelope carries errors;
    ///   any `data` alongside them is discarded
    pub async fn execute(
        &self,
        operation: &str,
        variables: Option<Value>,
        operation_name: Option<&str>,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<GraphqlEnvelope, GraphqlClientError> {
        let mut body = serde_json::Map::new();
        body.insert("query".to_string(), Value::String(operation.to_string()));
        if let Some(variables) = variables {
            body.insert("variables".to_string(), variables);
        }
        if let Some(name) = operation_name {
            body.insert("operationName".to_string(), Value::String(name.to_string()));
        }

        let mut headers = self.default_headers.clone();
        if let Some(extra) = extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut request = self.client.post(&self.endpoint);
        for (key, value) in &headers {
            request = request.header(key, value);
        }
        if let Some(language_code) = &self.language_code {
            request = request.query(&[("languageCode", language_code.as_str())]);
        }

        let response = request.json(&Value::Object(body)).send().await?;

        let status = response.status().as_u16();
        let body_text = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(GraphqlClientError::Http {
                status,
                body: body_text,
            });
        }

        let envelope: GraphqlEnvelope = serde_json::from_str(&body_text)?;

        if !envelope.errors.is_empty() {
            let messages = envelope.error_messages();
            tracing::warn!(
                "GraphQL operation returned {} error(s): {}",
                messages.len(),
                messages.join("; ")
            );
            return Err(GraphqlClientError::Graphql { messages });
        }

        Ok(envelope)
    }
}
