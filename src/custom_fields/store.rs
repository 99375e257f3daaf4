//! Decode-time storage for extended field values.
//!
//! When a response entity is decoded, the raw JSON object is scanned for the
//! field names configured in the [`CustomFieldRegistry`] and any matches are
//! retained here, keyed by `(entity type, entity id)`. Typed accessors then
//! read the values back on demand.
//!
//! Extension fields are optional by design: every accessor is best-effort
//! and converts decode failures into `None` rather than erroring, so a
//! misconfigured extension can never fail the primary decode.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::custom_fields::CustomFieldRegistry;

/// `(type name, entity id)` — typed keying avoids collisions between
/// unrelated entity types that happen to share an id.
type EntityKey = (String, String);

#[derive(Debug, Default)]
struct EntityExtensions {
    values: HashMap<String, Value>,
    /// The entity's raw `customFields` value, retained for fallback lookups.
    custom_fields_raw: Option<Value>,
}

/// Per-entity storage of decoded extension values.
///
/// Owned by the client and scoped to its lifetime; entries accumulate until
/// [`clear`](Self::clear) is called. Populated once per decoded entity, read
/// any number of times.
///
/// # Example
///
/// ```rust
/// use vendure_api::custom_fields::{CustomFieldRegistry, CustomFieldSpec, ExtendedFieldStore};
/// use serde_json::json;
///
/// let registry = CustomFieldRegistry::new();
/// registry.add(CustomFieldSpec::extended_scalar("calculatedScore", ["Product"]));
///
/// let store = ExtendedFieldStore::new();
/// store.populate(
///     "Product",
///     "p1",
///     &json!({ "id": "p1", "calculatedScore": 8.5 }),
///     &registry,
/// );
///
/// assert_eq!(store.get::<f64>("Product", "p1", "calculatedScore"), Some(8.5));
/// assert_eq!(store.get::<String>("Product", "p1", "calculatedScore"), None);
/// ```
#[derive(Debug, Default)]
pub struct ExtendedFieldStore {
    entries: RwLock<HashMap<EntityKey, EntityExtensions>>,
}

// Verify ExtendedFieldStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ExtendedFieldStore>();
};

/// Native `customFields` arrive either as a nested JSON object or as a
/// string-encoded JSON blob, depending on the backend version. Both decode
/// to an object here.
fn normalize_custom_fields(value: &Value) -> Option<Value> {
    match value {
        Value::Object(_) => Some(value.clone()),
        Value::String(encoded) => serde_json::from_str::<Value>(encoded)
            .ok()
            .filter(Value::is_object),
        _ => None,
    }
}

impl ExtendedFieldStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(type_name: &str, entity_id: &str) -> EntityKey {
        (type_name.to_string(), entity_id.to_string())
    }

    /// Scans `raw_json` for configured field values and stores any matches
    /// under `(type_name, entity_id)`.
    ///
    /// Extended specs match a top-level key equal to their field name; native
    /// specs match keys inside `raw_json["customFields"]`, which may be an
    /// object or a string-encoded JSON blob. The raw `customFields` value is
    /// also retained for [`get_with_custom_fields_fallback`](Self::get_with_custom_fields_fallback).
    ///
    /// Re-populating the same entity replaces its previous values.
    pub fn populate(
        &self,
        type_name: &str,
        entity_id: &str,
        raw_json: &Value,
        registry: &CustomFieldRegistry,
    ) {
        let Some(object) = raw_json.as_object() else {
            return;
        };

        let custom_fields = object.get("customFields").and_then(normalize_custom_fields);
        let mut entry = EntityExtensions {
            values: HashMap::new(),
            custom_fields_raw: object.get("customFields").cloned(),
        };

        for spec in registry.resolved_fields_for(type_name) {
            if spec.is_extended_field() {
                if let Some(value) = object.get(spec.field_name()) {
                    entry
                        .values
                        .insert(spec.field_name().to_string(), value.clone());
                }
            } else if let Some(fields) = custom_fields.as_ref().and_then(Value::as_object) {
                for name in spec.native_names() {
                    if let Some(value) = fields.get(name) {
                        entry.values.insert(name.to_string(), value.clone());
                    }
                }
            }
        }

        if entry.values.is_empty() && entry.custom_fields_raw.is_none() {
            return;
        }

        tracing::debug!(
            "stored {} extension value(s) for {} '{}'",
            entry.values.len(),
            type_name,
            entity_id
        );
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Self::key(type_name, entity_id), entry);
    }

    /// Returns the stored value for `field`, decoded into `T`.
    ///
    /// Best-effort: returns `None` when the entity or field is unknown, or
    /// when the stored value does not decode into `T`. Never errors.
    #[must_use]
    pub fn get<T: DeserializeOwned>(
        &self,
        type_name: &str,
        entity_id: &str,
        field: &str,
    ) -> Option<T> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let value = entries
            .get(&Self::key(type_name, entity_id))?
            .values
            .get(field)?
            .clone();
        drop(entries);
        serde_json::from_value(value).ok()
    }

    /// Returns `true` if a value is stored for `field` on the given entity.
    #[must_use]
    pub fn has(&self, type_name: &str, entity_id: &str, field: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&Self::key(type_name, entity_id))
            .is_some_and(|entry| entry.values.contains_key(field))
    }

    /// Two-tier lookup for fields that may arrive through either extension
    /// mechanism.
    ///
    /// Checks the extended-field values first; if absent, falls back to
    /// parsing the entity's retained native `customFields` value (object or
    /// string-encoded blob) for a same-named key. Applications configure one
    /// mechanism or the other depending on backend capability, so both paths
    /// are tried in this fixed order.
    #[must_use]
    pub fn get_with_custom_fields_fallback<T: DeserializeOwned>(
        &self,
        type_name: &str,
        entity_id: &str,
        field: &str,
    ) -> Option<T> {
        if let Some(value) = self.get(type_name, entity_id, field) {
            return Some(value);
        }

        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let raw = entries
            .get(&Self::key(type_name, entity_id))?
            .custom_fields_raw
            .clone();
        drop(entries);

        let fields = normalize_custom_fields(raw.as_ref()?)?;
        let value = fields.get(field)?.clone();
        serde_json::from_value(value).ok()
    }

    /// Removes every stored entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom_fields::CustomFieldSpec;
    use serde_json::json;

    fn registry_with(specs: impl IntoIterator<Item = CustomFieldSpec>) -> CustomFieldRegistry {
        let registry = CustomFieldRegistry::new();
        registry.add_all(specs);
        registry
    }

    #[test]
    fn test_populate_then_get_typed_value() {
        let registry = registry_with([CustomFieldSpec::extended_scalar(
            "calculatedScore",
            ["Product"],
        )]);
        let store = ExtendedFieldStore::new();

        store.populate(
            "Product",
            "p1",
            &json!({ "id": "p1", "calculatedScore": 8.5 }),
            &registry,
        );

        assert_eq!(store.get::<f64>("Product", "p1", "calculatedScore"), Some(8.5));
        assert!(store.has("Product", "p1", "calculatedScore"));
    }

    #[test]
    fn test_get_returns_none_on_missing_key_or_type_mismatch() {
        let registry = registry_with([CustomFieldSpec::extended_scalar(
            "calculatedScore",
            ["Product"],
        )]);
        let store = ExtendedFieldStore::new();

        store.populate(
            "Product",
            "p1",
            &json!({ "id": "p1", "calculatedScore": 8.5 }),
            &registry,
        );

        // Missing field, missing entity, and wrong target type all read as absent.
        assert_eq!(store.get::<f64>("Product", "p1", "missing"), None);
        assert_eq!(store.get::<f64>("Product", "p2", "calculatedScore"), None);
        assert_eq!(store.get::<String>("Product", "p1", "calculatedScore"), None);
    }

    #[test]
    fn test_populate_ignores_unconfigured_keys() {
        let registry = registry_with([CustomFieldSpec::extended_scalar("known", ["Product"])]);
        let store = ExtendedFieldStore::new();

        store.populate(
            "Product",
            "p1",
            &json!({ "id": "p1", "known": 1, "unknown": 2 }),
            &registry,
        );

        assert_eq!(store.get::<i64>("Product", "p1", "known"), Some(1));
        assert!(!store.has("Product", "p1", "unknown"));
    }

    #[test]
    fn test_native_fields_read_from_custom_fields_object() {
        let registry = registry_with([CustomFieldSpec::native_custom_field("priority", ["Order"])]);
        let store = ExtendedFieldStore::new();

        store.populate(
            "Order",
            "o1",
            &json!({ "id": "o1", "customFields": { "priority": 3 } }),
            &registry,
        );

        assert_eq!(store.get::<i64>("Order", "o1", "priority"), Some(3));
    }

    #[test]
    fn test_native_fields_read_from_string_encoded_custom_fields() {
        let registry = registry_with([CustomFieldSpec::native_custom_field("priority", ["Order"])]);
        let store = ExtendedFieldStore::new();

        store.populate(
            "Order",
            "o1",
            &json!({ "id": "o1", "customFields": "{\"priority\": 7}" }),
            &registry,
        );

        assert_eq!(store.get::<i64>("Order", "o1", "priority"), Some(7));
    }

    #[test]
    fn test_entities_of_different_types_do_not_collide_on_shared_id() {
        let registry = registry_with([
            CustomFieldSpec::extended_scalar("score", ["Product"]),
            CustomFieldSpec::extended_scalar("score", ["Order"]),
        ]);
        let store = ExtendedFieldStore::new();

        store.populate("Product", "1", &json!({ "score": 10 }), &registry);
        store.populate("Order", "1", &json!({ "score": 20 }), &registry);

        assert_eq!(store.get::<i64>("Product", "1", "score"), Some(10));
        assert_eq!(store.get::<i64>("Order", "1", "score"), Some(20));
    }

    #[test]
    fn test_fallback_reads_native_blob_when_extension_absent() {
        // Nothing configured as an extended field; the value only exists in
        // the native customFields blob.
        let registry = CustomFieldRegistry::new();
        let store = ExtendedFieldStore::new();

        store.populate(
            "Product",
            "p1",
            &json!({
                "id": "p1",
                "customFields": "{\"mainUsdzAsset\": {\"id\": \"a1\", \"name\": \"model\"}}"
            }),
            &registry,
        );

        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct MiniAsset {
            id: String,
            name: String,
        }

        let asset: MiniAsset = store
            .get_with_custom_fields_fallback("Product", "p1", "mainUsdzAsset")
            .unwrap();
        assert_eq!(asset.id, "a1");
    }

    #[test]
    fn test_fallback_prefers_extended_value_when_present() {
        let registry = registry_with([CustomFieldSpec::extended_scalar("flag", ["Product"])]);
        let store = ExtendedFieldStore::new();

        store.populate(
            "Product",
            "p1",
            &json!({
                "flag": "from-extension",
                "customFields": { "flag": "from-native" }
            }),
            &registry,
        );

        assert_eq!(
            store.get_with_custom_fields_fallback::<String>("Product", "p1", "flag"),
            Some("from-extension".to_string())
        );
    }

    #[test]
    fn test_clear_removes_all_entries() {
        let registry = registry_with([CustomFieldSpec::extended_scalar("score", ["Product"])]);
        let store = ExtendedFieldStore::new();
        store.populate("Product", "p1", &json!({ "score": 1 }), &registry);

        store.clear();

        assert!(!store.has("Product", "p1", "score"));
    }

    #[test]
    fn test_populate_with_non_object_json_is_a_no_op() {
        let registry = registry_with([CustomFieldSpec::extended_scalar("score", ["Product"])]);
        let store = ExtendedFieldStore::new();

        store.populate("Product", "p1", &json!([1, 2, 3]), &registry);

        assert!(!store.has("Product", "p1", "score"));
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExtendedFieldStore>();
    }
}
