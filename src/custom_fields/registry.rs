//! The field spec registry and query fragment injector.
//!
//! [`CustomFieldRegistry`] holds the ordered list of configured
//! [`CustomFieldSpec`]s and answers two questions on every request: which
//! specs apply to an entity type, and what GraphQL selection-set text should
//! be spliced into a query for that type.
//!
//! The registry is owned by the client (or constructed standalone and shared
//! via `Arc`); there is deliberately no process-wide singleton, so tests and
//! multiple SDK sessions never observe each other's configuration.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;
use std::sync::{PoisonError, RwLock};

use crate::custom_fields::CustomFieldSpec;

/// Ordered, thread-safe store of configured field specs.
///
/// Mutation (`add`, `add_all`, `clear`) is expected at application startup;
/// reads happen on every request. Both are safe under concurrent access:
/// the spec list sits behind an `RwLock` that is never held across await
/// points.
///
/// # Example
///
/// ```rust
/// use vendure_api::custom_fields::{CustomFieldRegistry, CustomFieldSpec};
///
/// let registry = CustomFieldRegistry::new();
/// registry.add(CustomFieldSpec::extended_asset("mainUsdzAsset", ["Product"]));
/// registry.add(CustomFieldSpec::native_custom_field("priority", ["Order"]));
///
/// assert_eq!(registry.fields_for("Product").len(), 1);
/// assert_eq!(
///     registry.inject_fields("Product"),
///     "mainUsdzAsset { id name type mimeType source preview }"
/// );
/// ```
#[derive(Debug, Default)]
pub struct CustomFieldRegistry {
    fields: RwLock<Vec<CustomFieldSpec>>,
}

// Verify CustomFieldRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CustomFieldRegistry>();
};

impl CustomFieldRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<CustomFieldSpec>> {
        self.fields.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<CustomFieldSpec>> {
        self.fields.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a single spec, appended in insertion order.
    pub fn add(&self, spec: CustomFieldSpec) {
        self.write().push(spec);
    }

    /// Registers a batch of specs, preserving their order.
    pub fn add_all(&self, specs: impl IntoIterator<Item = CustomFieldSpec>) {
        self.write().extend(specs);
    }

    /// Removes every registered spec.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Returns every spec applicable to `type_name`, in registration order.
    ///
    /// No de-duplication is applied here; duplicate `(type, field name)`
    /// registrations are resolved last-write-wins at injection and
    /// population time.
    #[must_use]
    pub fn fields_for(&self, type_name: &str) -> Vec<CustomFieldSpec> {
        self.read()
            .iter()
            .filter(|spec| spec.applies_to(type_name))
            .cloned()
            .collect()
    }

    /// Returns every entity type name with at least one configured spec.
    #[must_use]
    pub fn types_with_configured_fields(&self) -> BTreeSet<String> {
        self.read()
            .iter()
            .flat_map(|spec| spec.applicable_types().iter().cloned())
            .collect()
    }

    /// Specs applicable to `type_name` after duplicate resolution.
    ///
    /// When the same field name is registered more than once for a type, the
    /// last-registered definition wins, occupying the first-registered
    /// position.
    pub(crate) fn resolved_fields_for(&self, type_name: &str) -> Vec<CustomFieldSpec> {
        let mut order: Vec<String> = Vec::new();
        let mut by_name: HashMap<String, CustomFieldSpec> = HashMap::new();

        for spec in self.read().iter().filter(|s| s.applies_to(type_name)) {
            let key = spec.field_name().to_string();
            if !by_name.contains_key(&key) {
                order.push(key.clone());
            }
            by_name.insert(key, spec.clone());
        }

        order
            .into_iter()
            .filter_map(|key| by_name.remove(&key))
            .collect()
    }

    /// Produces the GraphQL selection-set fragment to splice into a query
    /// for `type_name`.
    ///
    /// Each applicable extended spec contributes its own line, in
    /// registration order. All applicable native custom field names are
    /// unioned (first-seen order, de-duplicated) into a single trailing
    /// `customFields { ... }` block. Returns an empty string when nothing is
    /// configured for the type.
    ///
    /// The result is spliced textually by the caller, typically immediately
    /// before the closing brace of the entity's selection set. No GraphQL
    /// parsing or validation is performed; a malformed splice point is the
    /// caller's responsibility.
    #[must_use]
    pub fn inject_fields(&self, type_name: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut native_names: Vec<String> = Vec::new();

        for spec in self.resolved_fields_for(type_name) {
            if let Some(fragment) = spec.graphql_fragment() {
                lines.push(fragment);
            }
            for name in spec.native_names() {
                if !native_names.iter().any(|n| n == name) {
                    native_names.push(name.to_string());
                }
            }
        }

        if !native_names.is_empty() {
            lines.push(format!("customFields {{ {} }}", native_names.join(" ")));
        }

        lines.join("\n")
    }

    /// Checks the configuration for likely mistakes, returning one warning
    /// string per finding. Pure read; callers decide whether to log.
    ///
    /// Flags:
    /// - specs with an empty applicable-type set (never injected)
    /// - duplicate `(type, field name)` registrations across incompatible
    ///   kinds (last registration wins)
    /// - native groups with no names
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let fields = self.read();
        let mut warnings = Vec::new();

        for spec in fields.iter() {
            if spec.applicable_types().is_empty() {
                warnings.push(format!(
                    "field '{}' has no applicable types and will never be injected",
                    spec.field_name()
                ));
            }
            if !spec.is_extended_field() && spec.native_names().is_empty() {
                warnings.push("a native custom field group was registered with no names".to_string());
            }
        }

        // (type, name) -> kind discriminants seen
        let mut seen: HashMap<(String, String), Vec<std::mem::Discriminant<_>>> = HashMap::new();
        for spec in fields.iter() {
            for type_name in spec.applicable_types() {
                let key = (type_name.clone(), spec.field_name().to_string());
                let kinds = seen.entry(key.clone()).or_default();
                let discriminant = std::mem::discriminant(spec.kind());
                if !kinds.is_empty() && !kinds.contains(&discriminant) {
                    warnings.push(format!(
                        "field '{}' is registered for type '{}' with incompatible kinds; the last registration wins",
                        key.1, key.0
                    ));
                }
                kinds.push(discriminant);
            }
        }

        warnings
    }

    /// Returns a human-readable dump of the configuration.
    ///
    /// Intended for debugging output only; the format is not stable.
    #[must_use]
    pub fn summary(&self) -> String {
        let fields = self.read();
        if fields.is_empty() {
            return "No custom fields configured.".to_string();
        }

        let mut out = format!("{} configured field spec(s):\n", fields.len());
        for spec in fields.iter() {
            let types = spec
                .applicable_types()
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                out,
                "- {} ({}) on [{}]",
                spec.field_name(),
                spec.kind_label(),
                types
            );
        }
        out
    }
}
