//! Subcatchment records

use crate::table::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a subcatchment table: a drainage sub-area with a unique id,
/// a reference to its immediate downstream neighbor, and attribute values.
///
/// `downstream` either names another record's id or holds a terminal
/// sentinel (an id that appears nowhere in the table, e.g. `"Ocean"`)
/// marking an outfall at the edge of the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcatchment {
    /// Unique identifier of this sub-area
    pub id: String,
    /// Id of the downstream neighbor, or a terminal sentinel
    pub downstream: String,
    /// Attribute values keyed by column name
    #[serde(default)]
    pub values: HashMap<String, AttributeValue>,
}

impl Subcatchment {
    /// Create a record with no attribute values
    pub fn new(id: impl Into<String>, downstream: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            downstream: downstream.into(),
            values: HashMap::new(),
        }
    }

    /// Builder-style attribute assignment
    pub fn with_value(mut self, column: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Get an attribute value
    pub fn value(&self, column: &str) -> Option<&AttributeValue> {
        self.values.get(column)
    }

    /// Set an attribute value
    pub fn set_value(&mut self, column: impl Into<String>, value: AttributeValue) {
        self.values.insert(column.into(), value);
    }
}
