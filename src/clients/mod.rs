//! GraphQL client functionality for the Vendure API.
//!
//! This module contains the request/response pipeline:
//!
//! - [`VendureClient`]: the operation dispatcher composing transport, token
//!   manager, and the custom-fields subsystem
//! - [`GraphqlTransport`]: single-attempt HTTP POST transport
//! - [`GraphqlEnvelope`]: the `{data, errors}` wire envelope
//! - [`GraphqlClientError`]: the pipeline's error taxonomy

mod client;
mod envelope;
mod errors;
mod transport;

pub use client::VendureClient;
pub use envelope::{ErrorLocation, GraphqlEnvelope, GraphqlErrorEntry};
pub use errors::GraphqlClientError;
pub use transport::{GraphqlTransport, SDK_VERSION};
