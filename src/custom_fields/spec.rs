//! Declarative field specs and their GraphQL fragments.
//!
//! A [`CustomFieldSpec`] describes one field extension: either a
//! schema-extension field (a top-level selection added by a backend plugin)
//! or a native custom field (nested under the backend's own `customFields`
//! object). Specs are pure data; rendering a spec to GraphQL text is a pure
//! function of its kind and names.

use std::collections::BTreeSet;

/// Fixed sub-selection requested for extended asset fields.
///
/// Asset payloads have a stable shape across backends, so the selection is
/// not configurable per spec.
pub const ASSET_SUB_FIELDS: &str = "id name type mimeType source preview";

/// The shape of a configured field extension.
///
/// Extended kinds add a top-level selection the base schema doesn't have;
/// native kinds register names inside the backend's `customFields` object and
/// render no fragment of their own (the registry merges them into a single
/// `customFields { ... }` block per type).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomFieldKind {
    /// An asset-like relation with the fixed [`ASSET_SUB_FIELDS`] selection.
    ExtendedAsset,
    /// A scalar leaf; the fragment is the bare field name.
    ExtendedScalar,
    /// A relation with a flat sub-selection: `name { a b c }`.
    ExtendedRelation {
        /// Selection requested under the field, in order.
        sub_fields: Vec<String>,
    },
    /// A relation with nested sub-selections: `name { k1 { a b } k2 { c } }`.
    ExtendedComplexRelation {
        /// Nested selections keyed by sub-field, in insertion order.
        nested: Vec<(String, Vec<String>)>,
    },
    /// A single native custom field inside `customFields { ... }`.
    Native,
    /// Several native custom fields registered together.
    NativeGroup {
        /// The field names in the group.
        names: Vec<String>,
    },
}

/// One configured field extension.
///
/// # Identity and Merging
///
/// `field_name` is the lookup key. Multiple specs may share a name across
/// different entity types; within one type, the last-registered definition
/// for a name wins when fragments are injected or values populated
/// (last-write-wins, matching mutable re-registration semantics). For
/// [`CustomFieldKind::NativeGroup`], `field_name` holds the group's first
/// name and [`native_names`](Self::native_names) yields all of them.
///
/// # Example
///
/// ```rust
/// use vendure_api::custom_fields::CustomFieldSpec;
///
/// let spec = CustomFieldSpec::extended_asset("mainUsdzAsset", ["Product"]);
/// assert!(spec.is_extended_field());
/// assert!(spec.applies_to("Product"));
/// assert_eq!(
///     spec.graphql_fragment().unwrap(),
///     "mainUsdzAsset { id name type mimeType source preview }"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomFieldSpec {
    field_name: String,
    kind: CustomFieldKind,
    applicable_types: BTreeSet<String>,
}

impl CustomFieldSpec {
    fn new(
        field_name: impl Into<String>,
        kind: CustomFieldKind,
        applicable_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            kind,
            applicable_types: applicable_types.into_iter().map(Into::into).collect(),
        }
    }

    /// A schema-extension field with the fixed asset sub-selection.
    #[must_use = "the spec must be registered to take effect"]
    pub fn extended_asset(
        name: impl Into<String>,
        applicable_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(name, CustomFieldKind::ExtendedAsset, applicable_types)
    }

    /// A schema-extension scalar leaf.
    #[must_use = "the spec must be registered to take effect"]
    pub fn extended_scalar(
        name: impl Into<String>,
        applicable_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(name, CustomFieldKind::ExtendedScalar, applicable_types)
    }

    /// A schema-extension relation with a flat sub-selection.
    #[must_use = "the spec must be registered to take effect"]
    pub fn extended_relation(
        name: impl Into<String>,
        sub_fields: impl IntoIterator<Item = impl Into<String>>,
        applicable_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(
            name,
            CustomFieldKind::ExtendedRelation {
                sub_fields: sub_fields.into_iter().map(Into::into).collect(),
            },
            applicable_types,
        )
    }

    /// A schema-extension relation with nested sub-selections.
    ///
    /// `nested` maps each sub-field to its own selection; insertion order is
    /// preserved in the rendered fragment.
    #[must_use = "the spec must be registered to take effect"]
    pub fn extended_complex_relation(
        name: impl Into<String>,
        nested: impl IntoIterator<Item = (impl Into<String>, Vec<String>)>,
        applicable_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(
            name,
            CustomFieldKind::ExtendedComplexRelation {
                nested: nested
                    .into_iter()
                    .map(|(key, fields)| (key.into(), fields))
                    .collect(),
            },
            applicable_types,
        )
    }

    /// A single native custom field, requested inside `customFields { ... }`.
    #[must_use = "the spec must be registered to take effect"]
    pub fn native_custom_field(
        name: impl Into<String>,
        applicable_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(name, CustomFieldKind::Native, applicable_types)
    }

    /// Several native custom fields registered as one spec.
    #[must_use = "the spec must be registered to take effect"]
    pub fn native_custom_fields(
        names: impl IntoIterator<Item = impl Into<String>>,
        applicable_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let field_name = names.first().cloned().unwrap_or_default();
        Self::new(
            field_name,
            CustomFieldKind::NativeGroup { names },
            applicable_types,
        )
    }

    /// The GraphQL field name this spec requests, and its lookup key.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// The kind of this spec.
    #[must_use]
    pub const fn kind(&self) -> &CustomFieldKind {
        &self.kind
    }

    /// The entity type names this spec applies to.
    #[must_use]
    pub const fn applicable_types(&self) -> &BTreeSet<String> {
        &self.applicable_types
    }

    /// Returns `true` if this spec applies to the given entity type.
    #[must_use]
    pub fn applies_to(&self, type_name: &str) -> bool {
        self.applicable_types.contains(type_name)
    }

    /// Returns `true` unless this is a native custom field kind.
    #[must_use]
    pub const fn is_extended_field(&self) -> bool {
        !matches!(
            self.kind,
            CustomFieldKind::Native | CustomFieldKind::NativeGroup { .. }
        )
    }

    /// The native custom field names this spec contributes, if any.
    #[must_use]
    pub fn native_names(&self) -> Vec<&str> {
        match &self.kind {
            CustomFieldKind::Native => vec![self.field_name.as_str()],
            CustomFieldKind::NativeGroup { names } => {
                names.iter().map(String::as_str).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Renders this spec's top-level selection fragment.
    ///
    /// Returns `None` for native kinds, which render no fragment of their
    /// own; the registry merges their names into a single
    /// `customFields { ... }` block per type instead.
    #[must_use]
    pub fn graphql_fragment(&self) -> Option<String> {
        match &self.kind {
            CustomFieldKind::ExtendedAsset => {
                Some(format!("{} {{ {ASSET_SUB_FIELDS} }}", self.field_name))
            }
            CustomFieldKind::ExtendedScalar => Some(self.field_name.clone()),
            CustomFieldKind::ExtendedRelation { sub_fields } => Some(format!(
                "{} {{ {} }}",
                self.field_name,
                sub_fields.join(" ")
            )),
            CustomFieldKind::ExtendedComplexRelation { nested } => {
                let inner = nested
                    .iter()
                    .map(|(key, fields)| format!("{key} {{ {} }}", fields.join(" ")))
                    .collect::<Vec<_>>()
                    .join(" ");
                Some(format!("{} {{ {inner} }}", self.field_name))
            }
            CustomFieldKind::Native | CustomFieldKind::NativeGroup { .. } => None,
        }
    }

    /// A short human-readable label for this spec's kind.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self.kind {
            CustomFieldKind::ExtendedAsset => "extended asset",
            CustomFieldKind::ExtendedScalar => "extended scalar",
            CustomFieldKind::ExtendedRelation { .. } => "extended relation",
            CustomFieldKind::ExtendedComplexRelation { .. } => "extended complex relation",
            CustomFieldKind::Native => "native custom field",
            CustomFieldKind::NativeGroup { .. } => "native custom field group",
        }
    }
}
