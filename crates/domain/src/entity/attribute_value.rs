//! Typed attribute values attached to entity states.

use serde::{Deserialize, Serialize};

/// A single typed attribute value.
///
/// Lists and objects land in [`Json`](Self::Json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Json(serde_json::Value),
}

impl AttributeValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::Json(serde_json::Value::String(value)) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Json(serde_json::Value::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Json(value) => value.as_f64(),
            _ => None,
        }
    }

    /// The string items of a list value, skipping non-string items.
    ///
    /// A plain string counts as a one-item list, which is how the backend
    /// sometimes sends single-member groups.
    #[must_use]
    pub fn string_list(&self) -> Vec<&str> {
        match self {
            Self::String(value) => vec![value.as_str()],
            Self::Json(serde_json::Value::Array(items)) => {
                items.iter().filter_map(serde_json::Value::as_str).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Short human-readable rendering used in attribute tables.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::String(value) => value.clone(),
            Self::Json(value) => value.to_string(),
        }
    }
}
