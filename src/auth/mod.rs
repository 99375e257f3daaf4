//! Session token management for Vendure API authentication.
//!
//! Vendure authenticates shop-api requests with a session token, obtained
//! either from a login flow or supplied directly (guest sessions, tokens
//! minted by an external identity provider). This module owns that token's
//! lifecycle:
//!
//! - [`TokenManager`]: caches the current token, refreshes on expiry, and
//!   coalesces concurrent refreshes into a single fetch
//! - [`TokenFetcher`]: the pluggable credential source invoked on refresh
//! - [`AuthError`]: failures surfaced from the token lifecycle

mod errors;
mod token_manager;

pub use errors::AuthError;
pub use token_manager::{TokenFetcher, TokenFuture, TokenManager};
