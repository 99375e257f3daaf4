//! Error types for the GraphQL request pipeline.
//!
//! The taxonomy distinguishes where a request failed:
//!
//! - [`GraphqlClientError::Network`]: transport-level failure (DNS,
//!   connection, timeout) before a response was received
//! - [`GraphqlClientError::Http`]: a non-2xx HTTP response
//! - [`GraphqlClientError::Graphql`]: the server returned a well-formed
//!   envelope with a non-empty `errors` array
//! - [`GraphqlClientError::Decode`]: the response body or the targeted
//!   sub-object did not match the expected shape
//! - [`GraphqlClientError::NoData`]: the expected result path was absent
//! - [`GraphqlClientError::Auth`]: the session token could not be obtained
//!
//! None of these are retried inside the SDK; all propagate to the immediate
//! caller, which decides retry policy.

use thiserror::Error;

use crate::auth::AuthError;

/// Unified error type for GraphQL operations.
#[derive(Debug, Error)]
pub enum GraphqlClientError {
    /// Transport-level failure: DNS, connection, or timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx HTTP status.
    #[error("HTTP error {status}: {body}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The raw response body, for diagnostics.
        body: String,
    },

    /// The server reported GraphQL errors.
    ///
    /// Any `data` returned alongside the errors is treated as unusable; the
    /// caller never receives a partially decoded result.
    #[error("GraphQL errors: {}", .messages.join("; "))]
    Graphql {
        /// The error messages, in server order.
        messages: Vec<String>,
    },

    /// The response (or targeted sub-object) did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The expected result path was absent from the response data.
    #[error("No data at path '{path}' in GraphQL response")]
    NoData {
        /// The dotted path that was requested.
        path: String,
    },

    /// The session token could not be obtained.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_variant_joins_messages() {
        let error = GraphqlClientError::Graphql {
            messages: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(error.to_string(), "GraphQL errors: first; second");
    }

    #[test]
    fn test_http_variant_includes_status_and_body() {
        let error = GraphqlClientError::Http {
            status: 503,
            body: "upstream unavailable".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("upstream unavailable"));
    }

    #[test]
    fn test_no_data_variant_names_the_path() {
        let error = GraphqlClientError::NoData {
            path: "product".to_string(),
        };
        assert!(error.to_string().contains("'product'"));
    }

    #[test]
    fn test_auth_error_converts_transparently() {
        let error: GraphqlClientError = AuthError::Missing.into();
        assert!(matches!(error, GraphqlClientError::Auth(AuthError::Missing)));
        assert_eq!(error.to_string(), AuthError::Missing.to_string());
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = GraphqlClientError::NoData {
            path: "x".to_string(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
