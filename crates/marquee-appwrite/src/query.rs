//! Appwrite list-documents query builders.
//!
//! Appwrite (1.5+) takes each query as a JSON object passed in a repeated
//! `queries[]` parameter.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<serde_json::Value>,
}

impl Query {
    #[must_use]
    pub fn equal(attribute: &str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            method: "equal",
            attribute: Some(attribute.to_string()),
            values: vec![value.into()],
        }
    }

    #[must_use]
    pub fn order_desc(attribute: &str) -> Self {
        Self {
            method: "orderDesc",
            attribute: Some(attribute.to_string()),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn limit(limit: usize) -> Self {
        Self {
            method: "limit",
            attribute: None,
            values: vec![limit.into()],
        }
    }

    /// Serialized form sent as a `queries[]` value.
    #[must_use]
    pub fn to_param(&self) -> String {
        // Serializing a struct of strings and JSON values cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
