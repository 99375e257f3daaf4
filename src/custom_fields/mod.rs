//! The custom / extended fields subsystem.
//!
//! Vendure backends can expose extra data on an entity in two ways:
//!
//! - **Schema-extension fields**: a plugin adds a field to the GraphQL
//!   schema, requested as an ordinary top-level selection.
//! - **Native custom fields**: fields defined through the backend's built-in
//!   custom-fields mechanism, nested under a `customFields` selection.
//!
//! This module lets the embedding application declare either kind once at
//! startup and have the SDK splice the matching selection text into queries
//! and capture the returned values at decode time:
//!
//! - [`CustomFieldSpec`]: one declarative field spec and its fragment
//! - [`CustomFieldRegistry`]: ordered spec store + fragment injector
//! - [`ExtendedFieldStore`]: per-entity decoded values with typed accessors
//! - [`ExtendedEntity`]: implemented by response types that participate in
//!   decode-time population
//!
//! # Example
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
//! // Splice into a hand-written query before the closing brace:
//! let extra = registry.inject_fields("Product");
//! let query = format!("query {{ product(id: $id) {{ id name {extra} }} }}");
//! ```

mod registry;
mod spec;
mod store;

pub use registry::CustomFieldRegistry;
pub use spec::{CustomFieldKind, CustomFieldSpec, ASSET_SUB_FIELDS};
pub use store::ExtendedFieldStore;

/// Implemented by response types that participate in extended-field
/// population.
///
/// After the dispatcher decodes an entity, it hands the raw JSON to the
/// [`ExtendedFieldStore`] keyed by `TYPE_NAME` and the entity's id, making
/// configured extension values addressable through the store's typed
/// accessors.
pub trait ExtendedEntity: serde::de::DeserializeOwned {
    /// The GraphQL type name used for registry lookups (e.g. `"Product"`).
    const TYPE_NAME: &'static str;

    /// The entity's unique id, used as the storage key.
    fn entity_id(&self) -> &str;
}
