//! Wire types for the search endpoint JSON contract.
//!
//! The endpoint returns `{ "items": [ {code, source, description}, ... ] }`.
//! The widget treats items as opaque display data and tolerates missing or
//! extra fields in the response body.

use serde::{Deserialize, Serialize};

/// A single code returned from search.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    /// The code itself (e.g. "E11.9")
    pub code: String,
    /// Code system the result came from (e.g. "ICD-10-CM")
    pub source: String,
    /// Human-readable description of the code
    pub description: String,
}

/// Search response from the endpoint.
///
/// The `items` field may be absent entirely; it deserializes to an empty
/// list in that case. Additional response fields are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SearchResponse {
    /// Matching codes, in endpoint order
    #[serde(default)]
    pub items: Vec<ResultItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_item_roundtrip() {
        let item = ResultItem {
            code: "E11.9".to_string(),
            source: "ICD-10-CM".to_string(),
            description: "Type 2 diabetes mellitus without complications".to_string(),
        };

        let json = serde_json::to_string(&item).unwrap();
        let parsed: ResultItem = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, item);
    }

    #[test]
    fn test_response_with_items() {
        let json = r#"{"items":[{"code":"A1","source":"S","description":"d"}]}"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].code, "A1");
        assert_eq!(parsed.items[0].source, "S");
    }

    #[test]
    fn test_response_missing_items_defaults_to_empty() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let json = r#"{"items":[],"total":0,"elapsed_ms":12}"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.items.is_empty());
    }
}
