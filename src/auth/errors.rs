//! Error types for session token management.

use thiserror::Error;

/// Errors that can occur while obtaining or refreshing a session token.
///
/// `AuthError` is `Clone` so a single failed refresh attempt can be delivered
/// to every caller that was awaiting it.
///
/// # Example
///
/// ```rust
/// use vendure_api::auth::AuthError;
///
/// let error = AuthError::Fetch("credential service unavailable".to_string());
/// assert!(error.to_string().contains("credential service unavailable"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No token is available and no fetcher was configured to obtain one.
    #[error("No session token available and no token fetcher is configured. Call set_token() or configure a fetcher.")]
    Missing,

    /// The configured token fetcher failed.
    ///
    /// The SDK does not retry automatically; the embedding application
    /// decides its own retry policy.
    #[error("Session token fetch failed: {0}")]
    Fetch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_error_mentions_remediation() {
        let message = AuthError::Missing.to_string();
        assert!(message.contains("set_token"));
    }

    #[test]
    fn test_fetch_error_carries_cause() {
        let error = AuthError::Fetch("401 from identity provider".to_string());
        assert!(error.to_string().contains("401 from identity provider"));
    }

    #[test]
    fn test_auth_error_is_cloneable() {
        let error = AuthError::Fetch("boom".to_string());
        assert_eq!(error.clone(), error);
    }
}
