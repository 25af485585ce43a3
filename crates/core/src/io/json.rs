//! Flat-JSON attribute table reading/writing
//!
//! The interchange format is a JSON array of flat objects, one per feature
//! row, exactly as a GIS attribute table dumps to JSON:
//!
//! ```json
//! [
//!   {"CID": "541", "DS_CID": "571", "Cu": 1.2, "Watershed": "San Juan Creek"},
//!   {"CID": "754", "DS_CID": "618", "Cu": null, "Watershed": "San Juan Creek"}
//! ]
//! ```
//!
//! Which columns are structural is per-call configuration: a `TableMapping`
//! names the id column, the downstream column, and the value columns to
//! carry. There is no ambient workspace state.

use crate::error::{Error, Result};
use crate::table::{AttributeValue, Subcatchment, SubcatchmentTable};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// Column mapping for one load or save call.
///
/// `value_cols` may be left empty: on read, the value columns are then
/// inferred from the first row (every key except the two structural
/// columns, in alphabetical order); on write, the table's own schema is
/// used.
#[derive(Debug, Clone)]
pub struct TableMapping {
    /// Name of the unique-id column in the external table
    pub id_col: String,
    /// Name of the downstream-reference column in the external table
    pub ds_col: String,
    /// Names of the value columns to carry
    pub value_cols: Vec<String>,
}

impl TableMapping {
    /// Mapping with explicit structural column names and no value columns
    pub fn new(id_col: impl Into<String>, ds_col: impl Into<String>) -> Self {
        Self {
            id_col: id_col.into(),
            ds_col: ds_col.into(),
            value_cols: Vec::new(),
        }
    }

    /// Builder-style value column selection
    pub fn with_value_cols(mut self, cols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.value_cols = cols.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for TableMapping {
    fn default() -> Self {
        Self::new("ID", "DS_ID")
    }
}

/// Read an attribute table from a JSON file.
///
/// Validates that every mapped column is present in every row and that ids
/// are unique across the table; either failure aborts the load before a
/// table is built.
pub fn read_attribute_table<P: AsRef<Path>>(
    path: P,
    mapping: &TableMapping,
) -> Result<SubcatchmentTable> {
    let data = std::fs::read(path)?;
    read_attribute_table_from_slice(&data, mapping)
}

/// Read an attribute table from an in-memory JSON buffer.
///
/// Same as `read_attribute_table` but without touching the filesystem.
pub fn read_attribute_table_from_slice(
    data: &[u8],
    mapping: &TableMapping,
) -> Result<SubcatchmentTable> {
    let rows: Vec<Map<String, Value>> = serde_json::from_slice(data)?;

    let value_cols: Vec<String> = if mapping.value_cols.is_empty() {
        rows.first()
            .map(|first| {
                first
                    .keys()
                    .filter(|k| **k != mapping.id_col && **k != mapping.ds_col)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    } else {
        mapping.value_cols.clone()
    };

    let mut table = SubcatchmentTable::new(value_cols.iter().cloned());
    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());

    for row in &rows {
        let id = structural_field(row, &mapping.id_col)?;
        let downstream = structural_field(row, &mapping.ds_col)?;

        if !seen.insert(id.clone()) {
            return Err(Error::DuplicateId { id });
        }

        let mut record = Subcatchment::new(id, downstream);
        for col in &value_cols {
            let raw = row.get(col).ok_or_else(|| Error::MissingColumn {
                column: col.clone(),
            })?;
            record.set_value(col, attribute_from_json(col, raw)?);
        }
        table.push(record);
    }

    Ok(table)
}

/// Write an attribute table to a JSON file.
pub fn write_attribute_table<P: AsRef<Path>>(
    table: &SubcatchmentTable,
    path: P,
    mapping: &TableMapping,
) -> Result<()> {
    let bytes = write_attribute_table_to_vec(table, mapping)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Serialize an attribute table to a JSON buffer.
pub fn write_attribute_table_to_vec(
    table: &SubcatchmentTable,
    mapping: &TableMapping,
) -> Result<Vec<u8>> {
    let value_cols: Vec<String> = if mapping.value_cols.is_empty() {
        table.columns().to_vec()
    } else {
        mapping.value_cols.clone()
    };
    table.check_columns(&value_cols)?;

    let mut rows: Vec<Map<String, Value>> = Vec::with_capacity(table.len());
    for record in table.iter() {
        let mut row = Map::new();
        row.insert(mapping.id_col.clone(), Value::String(record.id.clone()));
        row.insert(
            mapping.ds_col.clone(),
            Value::String(record.downstream.clone()),
        );
        for col in &value_cols {
            let value = record.value(col).cloned().unwrap_or(AttributeValue::Null);
            row.insert(col.clone(), serde_json::to_value(value)?);
        }
        rows.push(row);
    }

    Ok(serde_json::to_vec_pretty(&rows)?)
}

/// Pull a structural column (id or downstream reference) out of a row.
///
/// String values are taken as-is; integer ids, common in feature classes,
/// are rendered to their decimal form so both sides of a reference compare
/// as the same key.
fn structural_field(row: &Map<String, Value>, column: &str) -> Result<String> {
    let raw = row.get(column).ok_or_else(|| Error::MissingColumn {
        column: column.to_string(),
    })?;

    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        other => Err(Error::Other(format!(
            "column {} holds {} where a string or integer id was expected",
            column, other
        ))),
    }
}

fn attribute_from_json(column: &str, value: &Value) -> Result<AttributeValue> {
    match value {
        Value::Null => Ok(AttributeValue::Null),
        Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(AttributeValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(AttributeValue::Float(f))
            } else {
                Err(Error::Other(format!(
                    "column {} holds a number out of range: {}",
                    column, n
                )))
            }
        }
        Value::String(s) => Ok(AttributeValue::Text(s.clone())),
        other => Err(Error::Other(format!(
            "column {} holds {} where a scalar was expected",
            column, other
        ))),
    }
}
