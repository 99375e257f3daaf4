//! Session token lifecycle management.
//!
//! This module provides the [`TokenManager`] type, which owns the current
//! session token, decides when to refresh it, and serializes concurrent
//! refresh attempts so the credential source is called at most once per
//! expiry.
//!
//! # Refresh Coalescing
//!
//! When the cached token is absent or expired, the first caller of
//! [`get_valid_token`](TokenManager::get_valid_token) starts a refresh in a
//! spawned task and every concurrent caller awaits that same attempt. A
//! caller being cancelled never cancels the shared refresh, because the fetch
//! runs in its own task.
//!
//! # Example
//!
//! ```rust,ignore
//! use vendure_api::auth::{TokenManager, AuthError};
//! use chrono::Duration;
//!
//! let manager = TokenManager::with_session_duration(
//!     || async { login_to_backend().await.map_err(|e| AuthError::Fetch(e.to_string())) },
//!     Duration::minutes(30),
//! );
//!
//! let token = manager.get_valid_token().await?;
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;

use crate::auth::AuthError;

/// Boxed future returned by [`TokenFetcher::fetch`].
pub type TokenFuture = Pin<Box<dyn Future<Output = Result<String, AuthError>> + Send + 'static>>;

/// A pluggable credential source.
///
/// Implementations perform the actual login or token exchange against
/// whatever identity mechanism the deployment uses (native login mutation,
/// Firebase, a custom auth service). The trait is implemented for any
/// `Fn() -> Future` closure, so tests and simple applications can pass an
/// async closure directly.
pub trait TokenFetcher: Send + Sync + 'static {
    /// Obtains a fresh session token.
    fn fetch(&self) -> TokenFuture;
}

impl<F, Fut> TokenFetcher for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, AuthError>> + Send + 'static,
{
    fn fetch(&self) -> TokenFuture {
        Box::pin((self)())
    }
}

type RefreshReceiver = watch::Receiver<Option<Result<String, AuthError>>>;

/// Owns the current session token and coordinates refreshes.
///
/// `TokenManager` is cheap to clone; clones share the same underlying state,
/// so a clone handed to another task observes the same token and the same
/// in-flight refresh.
///
/// # Token Sources
///
/// - [`from_token`](Self::from_token): a pre-obtained token (guest session or
///   direct token supply), with an optional expiry. No fetcher is configured,
///   so once the token expires, [`get_valid_token`](Self::get_valid_token)
///   fails with [`AuthError::Missing`].
/// - [`new`](Self::new) / [`with_session_duration`](Self::with_session_duration):
///   a [`TokenFetcher`] invoked on demand. With a session duration, each
///   fetched token expires that long after the fetch completed; without one,
///   fetched tokens are kept until [`invalidate`](Self::invalidate).
///
/// # Thread Safety
///
/// `TokenManager` is `Send + Sync` and safe to share across async tasks.
#[derive(Clone)]
pub struct TokenManager {
    inner: Arc<Inner>,
}

struct Inner {
    fetcher: Option<Arc<dyn TokenFetcher>>,
    session_duration: Option<Duration>,
    state: Mutex<TokenState>,
}

#[derive(Default)]
struct TokenState {
    token: Option<String>,
    expires: Option<DateTime<Utc>>,
    in_flight: Option<RefreshReceiver>,
}

// Verify TokenManager is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenManager>();
};

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token value is masked, matching the newtype conventions.
        let state = self.lock_state();
        f.debug_struct("TokenManager")
            .field("token", &state.token.as_ref().map(|_| "*****"))
            .field("expires", &state.expires)
            .field("refresh_in_flight", &state.in_flight.is_some())
            .finish()
    }
}

impl TokenManager {
    /// Creates a manager with a fetcher and no expiry policy.
    ///
    /// Fetched tokens are kept until [`invalidate`](Self::invalidate) is
    /// called.
    #[must_use]
    pub fn new(fetcher: impl TokenFetcher) -> Self {
        Self::build(Some(Arc::new(fetcher)), None)
    }

    /// Creates a manager with a fetcher and a fixed session duration.
    ///
    /// Each fetched token is considered expired `session_duration` after the
    /// fetch completed, at which point the next
    /// [`get_valid_token`](Self::get_valid_token) triggers a refresh.
    #[must_use]
    pub fn with_session_duration(fetcher: impl TokenFetcher, session_duration: Duration) -> Self {
        Self::build(Some(Arc::new(fetcher)), Some(session_duration))
    }

    /// Creates a manager seeded with a pre-obtained token and no fetcher.
    ///
    /// Used for guest sessions or when the embedding application manages
    /// credentials itself. `expires` of `None` means the token never expires.
    #[must_use]
    pub fn from_token(token: impl Into<String>, expires: Option<DateTime<Utc>>) -> Self {
        let manager = Self::build(None, None);
        manager.set_token(token, expires);
        manager
    }

    fn build(fetcher: Option<Arc<dyn TokenFetcher>>, session_duration: Option<Duration>) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                session_duration,
                state: Mutex::new(TokenState::default()),
            }),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, TokenState> {
        // The lock is only held for field reads/writes, never across await,
        // so a poisoned lock still guards consistent data.
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Explicitly sets the current token and its expiry.
    pub fn set_token(&self, token: impl Into<String>, expires: Option<DateTime<Utc>>) {
        let mut state = self.lock_state();
        state.token = Some(token.into());
        state.expires = expires;
    }

    /// Clears the current token, forcing the next
    /// [`get_valid_token`](Self::get_valid_token) to refresh.
    ///
    /// Used on logout or after the server rejects the credential. An
    /// in-flight refresh is not interrupted; its result still resolves the
    /// callers already awaiting it.
    pub fn invalidate(&self) {
        let mut state = self.lock_state();
        state.token = None;
        state.expires = None;
        tracing::debug!("session token invalidated");
    }

    /// Returns the current token without triggering a refresh, even if it
    /// has expired.
    #[must_use]
    pub fn current_token(&self) -> Option<String> {
        self.lock_state().token.clone()
    }

    /// Returns a valid session token, refreshing if necessary.
    ///
    /// If a non-expired token is cached, it is returned without suspending.
    /// Otherwise a refresh is started (or joined, if one is already in
    /// flight) and awaited. Exactly one fetch is issued per refresh no matter
    /// how many callers are waiting; every waiter observes the same outcome.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Missing`] if no token is cached and no fetcher is
    /// configured, or [`AuthError::Fetch`] if the fetcher failed. Failures
    /// are not cached; a subsequent call starts a new attempt.
    pub async fn get_valid_token(&self) -> Result<String, AuthError> {
        let mut rx = {
            let mut state = self.lock_state();

            if let Some(token) = state.token.clone() {
                let expired = state.expires.is_some_and(|expires| Utc::now() > expires);
                if !expired {
                    return Ok(token);
                }
            }

            if let Some(rx) = &state.in_flight {
                rx.clone()
            } else {
                let Some(fetcher) = self.inner.fetcher.clone() else {
                    return Err(AuthError::Missing);
                };

                let (tx, rx) = watch::channel(None);
                state.in_flight = Some(rx.clone());
                drop(state);

                tracing::debug!("starting session token refresh");
                let inner = Arc::clone(&self.inner);
                // The fetch runs in its own task so that cancelling a waiting
                // operation cannot cancel the refresh other callers share.
                tokio::spawn(async move {
                    let result = fetcher.fetch().await;

                    let mut state = inner
                        .state
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner);
                    match &result {
                        Ok(token) => {
                            state.token = Some(token.clone());
                            state.expires =
                                inner.session_duration.map(|duration| Utc::now() + duration);
                            tracing::debug!("session token refresh succeeded");
                        }
                        Err(error) => {
                            tracing::warn!("session token refresh failed: {error}");
                        }
                    }
                    state.in_flight = None;
                    drop(state);

                    let _ = tx.send(Some(result));
                });

                rx
            }
        };

        loop {
            {
                let value = rx.borrow_and_update();
                if let Some(result) = value.as_ref() {
                    return result.clone();
                }
            }
            if rx.changed().await.is_err() {
                return Err(AuthError::Fetch(
                    "token refresh task ended unexpectedly".to_string(),
                ));
            }
        }
    }
}
