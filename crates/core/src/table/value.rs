//! Typed attribute values

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single attribute value in a subcatchment table.
///
/// Comparison is strictly typed: `Int(2)` is not equal to `Float(2.0)`,
/// and `Text("2")` is not equal to `Int(2)`. An ignored-value sentinel of
/// the wrong type therefore never matches a cell; the cell is simply
/// treated as a valid measurement.
///
/// `Null` is the untyped no-data marker used when a source table has no
/// value at all for a cell. Score propagation accepts any variant as the
/// ignored sentinel, `Null` included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    /// Whether this is the `Null` no-data marker
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => write!(f, "null"),
            AttributeValue::Bool(v) => write!(f, "{}", v),
            AttributeValue::Int(v) => write!(f, "{}", v),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Text(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}
