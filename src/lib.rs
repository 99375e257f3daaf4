//! # Vendure API Rust SDK
//!
//! A Rust client SDK for Vendure-style e-commerce GraphQL APIs, providing
//! type-safe configuration, session token management, and an extensible
//! custom/extended fields overlay.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`VendureConfig`] and [`VendureConfigBuilder`]
//! - Validated newtypes for the endpoint, channel token, and language code
//! - Session token lifecycle with refresh coalescing via [`auth::TokenManager`]
//! - A single-attempt GraphQL transport over a pooled HTTP client
//! - A typed operation dispatcher ([`VendureClient`]) with dotted-path result
//!   extraction
//! - Declarative custom/extended field configuration: applications register
//!   [`custom_fields::CustomFieldSpec`]s once at startup, the SDK splices the
//!   matching GraphQL fragments into queries and captures returned values at
//!   decode time
//!
//! ## Quick Start
//!
//! ```rust
//! use vendure_api::{VendureConfig, EndpointUrl, ChannelToken};
//!
//! // Create configuration using the builder pattern
//! let config = VendureConfig::builder()
//!     .endpoint(EndpointUrl::new("https://shop.example.com/shop-api").unwrap())
//!     .channel_token(ChannelToken::new("default-channel").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Custom Fields
//!
//! Backends expose extra entity data either as schema-extension fields (a
//! plugin adds a top-level field) or native custom fields (nested under
//! `customFields`). Both are declared the same way:
//!
//! ```rust
//! use vendure_api::custom_fields::{CustomFieldRegistry, CustomFieldSpec};
//!
//! let registry = CustomFieldRegistry::new();
//! registry.add_all([
//!     CustomFieldSpec::extended_asset("mainUsdzAsset", ["Product"]),
//!     CustomFieldSpec::native_custom_field("priority", ["Order"]),
//! ]);
//!
//! assert!(registry
//!     .inject_fields("Product")
//!     .contains("mainUsdzAsset { id name type mimeType source preview }"));
//! assert_eq!(registry.inject_fields("Order"), "customFields { priority }");
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use vendure_api::{VendureClient, VendureConfig, EndpointUrl};
//! use vendure_api::auth::TokenManager;
//! use vendure_api::types::Product;
//! use serde_json::json;
//!
//! let config = VendureConfig::builder()
//!     .endpoint(EndpointUrl::new("https://shop.example.com/shop-api").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let tokens = TokenManager::from_token("session-token", None);
//! let client = VendureClient::with_token_manager(config, tokens);
//!
//! let query = format!(
//!     "query GetProduct($id: ID!) {{ product(id: $id) {{ id name {} }} }}",
//!     client.inject_fields("Product"),
//! );
//! let product: Product = client
//!     .query_entity(&query, Some(json!({ "id": "p1" })), "product")
//!     .await?;
//!
//! // Extension values captured at decode time:
//! use vendure_api::types::Asset;
//! let asset: Option<Asset> = client.extensions().get("Product", "p1", "mainUsdzAsset");
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the registry and extension store are owned by the
//!   client instance and passed by reference through the pipeline
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: all shared types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **Best-effort extensions**: extension lookups never fail the primary
//!   decode; absence and type mismatch read as `None`

pub mod auth;
pub mod clients;
pub mod config;
pub mod custom_fields;
pub mod error;
pub mod types;

// Re-export public types at crate root for convenience
pub use clients::{
    ErrorLocation, GraphqlClientError, GraphqlEnvelope, GraphqlErrorEntry, GraphqlTransport,
    VendureClient,
};
pub use config::{
    AuthHeaderScheme, ChannelToken, EndpointUrl, LanguageCode, VendureConfig,
    VendureConfigBuilder,
};
pub use error::ConfigError;
