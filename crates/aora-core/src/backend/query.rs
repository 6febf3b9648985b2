//! Query builder for document listings.
//!
//! Appwrite takes each query as a JSON object in a repeated `queries[]`
//! parameter: `{"method":"equal","attribute":"creator","values":["..."]}`.

use serde::Serialize;
use serde_json::Value;

/// Attribute holding a document's creation timestamp.
pub const CREATED_AT: &str = "$createdAt";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Vec<Value>>,
}

impl Query {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self {
            method: "equal",
            attribute: Some(attribute.to_string()),
            values: Some(vec![value.into()]),
        }
    }

    pub fn order_desc(attribute: &str) -> Self {
        Self {
            method: "orderDesc",
            attribute: Some(attribute.to_string()),
            values: None,
        }
    }

    pub fn limit(count: u32) -> Self {
        Self {
            method: "limit",
            attribute: None,
            values: Some(vec![Value::from(count)]),
        }
    }

    /// Full-text search; the attribute needs a fulltext index server-side.
    pub fn search(attribute: &str, text: &str) -> Self {
        Self {
            method: "search",
            attribute: Some(attribute.to_string()),
            values: Some(vec![Value::from(text)]),
        }
    }

    /// Wire form used in the `queries[]` parameter.
    pub fn to_param(&self) -> String {
        // Serializing a struct of strings and JSON values cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
