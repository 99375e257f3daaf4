//! A small set of wire types used with the typed request pipeline.
//!
//! The full Vendure catalog (pricing, promotions, checkout, and the rest)
//! lives server-side and is deliberately not mirrored here; these types cover
//! the shapes the SDK itself needs: the stable asset payload, minimal
//! entities demonstrating [`ExtendedEntity`] participation, and one input
//! type showing the omitted-key serialization convention.
//!
//! Applications define their own response structs the same way: derive
//! `Deserialize` with camelCase wire names, and implement [`ExtendedEntity`]
//! for anything that should participate in extended-field population.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::custom_fields::ExtendedEntity;

/// An asset payload, as selected by the fixed extended-asset sub-selection.
///
/// Only `id` is guaranteed; servers that return the wider asset shape
/// (file size and dimensions) decode into the optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Unique asset id.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Asset type reported by the server (e.g. `IMAGE`, `BINARY`).
    #[serde(rename = "type")]
    pub asset_type: Option<String>,
    /// Size in bytes.
    pub file_size: Option<u64>,
    /// MIME type (e.g. `model/usd`).
    pub mime_type: Option<String>,
    /// Pixel width, for image assets.
    pub width: Option<u32>,
    /// Pixel height, for image assets.
    pub height: Option<u32>,
    /// Source URL.
    pub source: Option<String>,
    /// Preview URL.
    pub preview: Option<String>,
}

/// A minimal product entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product id.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// URL slug.
    pub slug: Option<String>,
    /// Raw native custom fields: a nested object or a string-encoded JSON
    /// blob, depending on backend version.
    pub custom_fields: Option<Value>,
}

impl ExtendedEntity for Product {
    const TYPE_NAME: &'static str = "Product";

    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// A minimal order entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order id.
    pub id: String,
    /// Human-readable order code.
    pub code: Option<String>,
    /// Order state name.
    pub state: Option<String>,
    /// Raw native custom fields.
    pub custom_fields: Option<Value>,
}

impl ExtendedEntity for Order {
    const TYPE_NAME: &'static str = "Order";

    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// Input for creating a customer address.
///
/// Absent optional fields serialize as omitted keys, not `null`, so the
/// server's own defaults apply. An explicitly set field is always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressInput {
    /// Recipient full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// First address line (required).
    pub street_line1: String,
    /// Second address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_line2: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Province or state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// ISO country code (required).
    pub country_code: String,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Whether this becomes the default shipping address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_shipping_address: Option<bool>,
    /// Whether this becomes the default billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_billing_address: Option<bool>,
}
