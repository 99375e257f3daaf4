//! The GraphQL `{data, errors}` response envelope.
//!
//! The wire contract is the standard GraphQL response shape: a top-level
//! JSON object with an optional `data` object (or null) and an optional
//! `errors` array of `{message, locations?, path?}` entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A position in the operation text referenced by a server error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorLocation {
    /// 1-based line in the operation text.
    pub line: u32,
    /// 1-based column in the operation text.
    pub column: u32,
}

/// One entry of the envelope's `errors` array.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphqlErrorEntry {
    /// Human-readable error description.
    pub message: String,
    /// Positions in the operation text, when the server reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<ErrorLocation>>,
    /// Response path the error applies to. Entries are field names or list
    /// indices, so they are kept as raw JSON values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
}

/// A parsed GraphQL response envelope.
///
/// When `errors` is non-empty the transport surfaces
/// [`GraphqlClientError::Graphql`](crate::clients::GraphqlClientError::Graphql)
/// instead of returning the envelope, so downstream code only ever sees
/// envelopes whose data is usable.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlEnvelope {
    /// The operation result, when the server produced one.
    pub data: Option<Value>,
    /// Server-reported errors; empty on success.
    #[serde(default)]
    pub errors: Vec<GraphqlErrorEntry>,
}

impl GraphqlEnvelope {
    /// Collects the error messages, in order.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_parses_data_only_response() {
        let envelope: GraphqlEnvelope =
            serde_json::from_value(json!({ "data": { "product": { "id": "p1" } } })).unwrap();

        assert!(envelope.errors.is_empty());
        assert_eq!(envelope.data.unwrap()["product"]["id"], "p1");
    }

    #[test]
    fn test_envelope_parses_errors_with_locations_and_path() {
        let envelope: GraphqlEnvelope = serde_json::from_value(json!({
            "data": null,
            "errors": [{
                "message": "Cannot query field 'nope'",
                "locations": [{ "line": 2, "column": 5 }],
                "path": ["product", 0, "nope"]
            }]
        }))
        .unwrap();

        assert_eq!(envelope.errors.len(), 1);
        let entry = &envelope.errors[0];
        assert_eq!(entry.locations.as_ref().unwrap()[0].line, 2);
        assert_eq!(entry.path.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_envelope_parses_minimal_error_entry() {
        let envelope: GraphqlEnvelope = serde_json::from_value(json!({
            "errors": [{ "message": "boom" }]
        }))
        .unwrap();

        assert_eq!(envelope.error_messages(), vec!["boom"]);
        assert!(envelope.data.is_none());
    }
}
