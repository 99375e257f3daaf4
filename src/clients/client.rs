//! The operation dispatcher.
//!
//! [`VendureClient`] composes the transport, the token manager, and the
//! custom-fields subsystem into the full request pipeline:
//!
//! 1. resolve the auth header via the [`TokenManager`] (skipped for guest
//!    clients with no manager configured)
//! 2. execute the operation through the [`GraphqlTransport`]
//! 3. navigate the dotted `expected_path` inside the response data
//! 4. decode the targeted sub-object into the requested type
//! 5. for [`ExtendedEntity`] types, populate the [`ExtendedFieldStore`] from
//!    the same raw sub-object
//!
//! Queries are caller-supplied strings; the client splices configured
//! fragments via [`inject_fields`](VendureClient::inject_fields) but performs
//! no GraphQL parsing or validation.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::TokenManager;
use crate::clients::errors::GraphqlClientError;
use crate::clients::transport::GraphqlTransport;
use crate::config::VendureConfig;
use crate::custom_fields::{CustomFieldRegistry, ExtendedEntity, ExtendedFieldStore};

/// Typed GraphQL client for a Vendure shop API.
///
/// The client owns its configuration, registry, and extension store; there
/// is no process-wide state, so independent clients (and tests) never
/// observe each other's configuration.
///
/// # Thread Safety
///
/// `VendureClient` is `Send + Sync`. Any number of operations may be in
/// flight concurrently; no ordering between them is promised. Cancelling an
/// operation aborts its own HTTP call but never a shared in-flight token
/// refresh.
///
/// # Example
///
/// ```rust,ignore
/// use vendure_api::{VendureClient, VendureConfig, EndpointUrl};
/// use vendure_api::custom_fields::CustomFieldSpec;
/// use vendure_api::types::Product;
/// use serde_json::json;
///
/// let config = VendureConfig::builder()
///     .endpoint(EndpointUrl::new("https://shop.example.com/shop-api").unwrap())
///     .build()
///     .unwrap();
/// let client = VendureClient::new(config);
///
/// client.registry().add(CustomFieldSpec::extended_asset("mainUsdzAsset", ["Product"]));
///
/// let query = format!(
///     "query GetProduct($id: ID!) {{ product(id: $id) {{ id name {} }} }}",
///     client.inject_fields("Product"),
/// );
/// let product: Product = client
///     .query_entity(&query, Some(json!({ "id": "p1" })), "product")
///     .await?;
/// ```
#[derive(Debug)]
pub struct VendureClient {
    config: VendureConfig,
    transport: GraphqlTransport,
    tokens: Option<TokenManager>,
    registry: CustomFieldRegistry,
    extensions: ExtendedFieldStore,
}

// Verify VendureClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VendureClient>();
};

impl VendureClient {
    /// Creates a client with no token manager (guest access).
    ///
    /// Requests carry no auth header until a manager is attached via
    /// [`with_token_manager`](Self::with_token_manager).
    #[must_use]
    pub fn new(config: VendureConfig) -> Self {
        let transport = GraphqlTransport::new(&config);
        Self {
            config,
            transport,
            tokens: None,
            registry: CustomFieldRegistry::new(),
            extensions: ExtendedFieldStore::new(),
        }
    }

    /// Creates a client that resolves session tokens through `tokens`.
    #[must_use]
    pub fn with_token_manager(config: VendureConfig, tokens: TokenManager) -> Self {
        let mut client = Self::new(config);
        client.tokens = Some(tokens);
        client
    }

    /// Returns the client's configuration.
    #[must_use]
    pub const fn config(&self) -> &VendureConfig {
        &self.config
    }

    /// Returns the custom-field registry for this client.
    ///
    /// Typically configured once at application startup, before requests are
    /// issued; mutation is nonetheless safe at any time.
    #[must_use]
    pub const fn registry(&self) -> &CustomFieldRegistry {
        &self.registry
    }

    /// Returns the extended-field value store for this client.
    #[must_use]
    pub const fn extensions(&self) -> &ExtendedFieldStore {
        &self.extensions
    }

    /// Returns the token manager, if one is configured.
    #[must_use]
    pub const fn token_manager(&self) -> Option<&TokenManager> {
        self.tokens.as_ref()
    }

    /// Clears the cached session token, forcing a refresh on the next
    /// operation. No-op for guest clients.
    ///
    /// Server-side auth failures do not invalidate automatically; the
    /// embedding application calls this when it decides the credential is
    /// stale.
    pub fn invalidate_session(&self) {
        if let Some(tokens) = &self.tokens {
            tokens.invalidate();
        }
    }

    /// Renders the configured selection-set fragment for `type_name`.
    ///
    /// Convenience delegate to
    /// [`CustomFieldRegistry::inject_fields`](crate::custom_fields::CustomFieldRegistry::inject_fields).
    #[must_use]
    pub fn inject_fields(&self, type_name: &str) -> String {
        self.registry.inject_fields(type_name)
    }

    async fn auth_headers(&self) -> Result<Option<HashMap<String, String>>, GraphqlClientError> {
        let Some(tokens) = &self.tokens else {
            return Ok(None);
        };
        let token = tokens.get_valid_token().await?;
        let (name, value) = self.config.auth_header().header_for(&token);
        Ok(Some(HashMap::from([(name, value)])))
    }

    /// Executes an operation and returns the raw `data` object.
    ///
    /// This is the untyped escape hatch for callers that manage their own
    /// decoding; the typed `query`/`mutate` methods are built on it.
    ///
    /// # Errors
    ///
    /// Propagates every [`GraphqlClientError`] variant: auth failures, the
    /// transport taxonomy, and [`NoData`](GraphqlClientError::NoData) when
    /// the envelope carried no `data` object.
    pub async fn execute_raw(
        &self,
        operation: &str,
        variables: Option<Value>,
        operation_name: Option<&str>,
    ) -> Result<Value, GraphqlClientError> {
        let headers = self.auth_headers().await?;
        let envelope = self
            .transport
            .execute(operation, variables, operation_name, headers.as_ref())
            .await?;
        envelope.data.ok_or(GraphqlClientError::NoData {
            path: "data".to_string(),
        })
    }

    /// Navigates a dotted path inside the response data.
    ///
    /// A leading `data.` segment is accepted and stripped, so callers may
    /// write either `"product"` or `"data.product"`.
    fn value_at_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
        let path = path.strip_prefix("data.").unwrap_or(path);
        if path.is_empty() {
            return Some(data);
        }
        let mut current = data;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    async fn run<T: DeserializeOwned>(
        &self,
        operation: &str,
        variables: Option<Value>,
        expected_path: &str,
    ) -> Result<T, GraphqlClientError> {
        let data = self.execute_raw(operation, variables, None).await?;
        let target =
            Self::value_at_path(&data, expected_path).ok_or_else(|| GraphqlClientError::NoData {
                path: expected_path.to_string(),
            })?;
        Ok(serde_json::from_value(target.clone())?)
    }

    /// Executes a query and decodes the result at `expected_path` into `T`.
    ///
    /// # Errors
    ///
    /// - [`GraphqlClientError::Auth`] when no valid token could be obtained
    /// - the transport taxonomy ([`Network`](GraphqlClientError::Network),
    ///   [`Http`](GraphqlClientError::Http),
    ///   [`Graphql`](GraphqlClientError::Graphql))
    /// - [`GraphqlClientError::NoData`] when `expected_path` is absent
    /// - [`GraphqlClientError::Decode`] when the sub-object does not match `T`
    pub async fn query<T: DeserializeOwned>(
        &self,
        operation: &str,
        variables: Option<Value>,
        expected_path: &str,
    ) -> Result<T, GraphqlClientError> {
        self.run(operation, variables, expected_path).await
    }

    /// Executes a mutation and decodes the result at `expected_path` into `T`.
    ///
    /// GraphQL carries queries and mutations over the same POST pipeline, so
    /// this shares [`query`](Self::query)'s behavior and error taxonomy; the
    /// separate name keeps call sites honest about side effects.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub async fn mutate<T: DeserializeOwned>(
        &self,
        operation: &str,
        variables: Option<Value>,
        expected_path: &str,
    ) -> Result<T, GraphqlClientError> {
        self.run(operation, variables, expected_path).await
    }

    /// Executes a query for an [`ExtendedEntity`] and populates the
    /// extension store from the raw sub-object before returning the decoded
    /// entity.
    ///
    /// Extension population is best-effort and never fails the primary
    /// decode; configured values become addressable through
    /// [`extensions`](Self::extensions).
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub async fn query_entity<T: ExtendedEntity>(
        &self,
        operation: &str,
        variables: Option<Value>,
        expected_path: &str,
    ) -> Result<T, GraphqlClientError> {
        let data = self.execute_raw(operation, variables, None).await?;
        let target =
            Self::value_at_path(&data, expected_path).ok_or_else(|| GraphqlClientError::NoData {
                path: expected_path.to_string(),
            })?;

        let entity: T = serde_json::from_value(target.clone())?;
        self.extensions
            .populate(T::TYPE_NAME, entity.entity_id(), target, &self.registry);
        Ok(entity)
    }

    /// List variant of [`query_entity`](Self::query_entity): decodes each
    /// element of the array at `expected_path` and populates extensions per
    /// element.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query); a non-array value at `expected_path`
    /// surfaces as [`GraphqlClientError::Decode`].
    pub async fn query_entities<T: ExtendedEntity>(
        &self,
        operation: &str,
        variables: Option<Value>,
        expected_path: &str,
    ) -> Result<Vec<T>, GraphqlClientError> {
        let data = self.execute_raw(operation, variables, None).await?;
        let target =
            Self::value_at_path(&data, expected_path).ok_or_else(|| GraphqlClientError::NoData {
                path: expected_path.to_string(),
            })?;

        let raw_items: Vec<Value> = serde_json::from_value(target.clone())?;
        let mut entities = Vec::with_capacity(raw_items.len());
        for raw in &raw_items {
            let entity: T = serde_json::from_value(raw.clone())?;
            self.extensions
                .populate(T::TYPE_NAME, entity.entity_id(), raw, &self.registry);
            entities.push(entity);
        }
        Ok(entities)
    }
}
