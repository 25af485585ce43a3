//! The subcatchment forest table
//!
//! A `SubcatchmentTable` is a flat table of drainage sub-areas. Each row
//! points at exactly one downstream neighbor, so the table as a whole forms
//! an implicit forest of trees rooted at terminal sentinels (outfalls such
//! as `"Ocean"`). The table is the unit of exchange for every engine
//! operation: operations borrow a table and return a new one, inputs are
//! never mutated in place.

mod record;
mod value;

pub use record::Subcatchment;
pub use value::AttributeValue;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An ordered table of subcatchment records with a named value-column schema.
///
/// Row order is preserved through every transformation: subsetting
/// operations are filters, not re-ordering traversals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubcatchmentTable {
    columns: Vec<String>,
    records: Vec<Subcatchment>,
}

impl SubcatchmentTable {
    /// Create an empty table with the given value-column schema
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            records: Vec::new(),
        }
    }

    /// Append a record
    pub fn push(&mut self, record: Subcatchment) {
        self.records.push(record);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value-column names, in schema order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All records, in row order
    pub fn records(&self) -> &[Subcatchment] {
        &self.records
    }

    /// Iterate over records in row order
    pub fn iter(&self) -> impl Iterator<Item = &Subcatchment> {
        self.records.iter()
    }

    /// Iterate mutably over records in row order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Subcatchment> {
        self.records.iter_mut()
    }

    /// Find a record by id
    pub fn get(&self, id: &str) -> Option<&Subcatchment> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Find a record's row position by id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Whether an id is present in the table
    pub fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Check that every requested value column is in the schema.
    ///
    /// Operations call this before any computation so a bad column name
    /// fails fast instead of producing a partially computed table.
    pub fn check_columns<S: AsRef<str>>(&self, required: &[S]) -> Result<()> {
        for name in required {
            let name = name.as_ref();
            if !self.columns.iter().any(|c| c == name) {
                return Err(Error::MissingColumn {
                    column: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// New table containing the records matching a predicate, same schema,
    /// original row order.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&Subcatchment) -> bool,
    {
        Self {
            columns: self.columns.clone(),
            records: self.records.iter().filter(|r| pred(r)).cloned().collect(),
        }
    }

    /// Merge value columns from another table by matching id.
    ///
    /// For every record of `self` that also appears in `other`, the listed
    /// columns are overwritten with `other`'s values. Records absent from
    /// `other` keep their current values. Columns not yet in the schema are
    /// appended to it.
    pub fn update_from<S: AsRef<str>>(&self, other: &Self, columns: &[S]) -> Result<Self> {
        other.check_columns(columns)?;

        let mut out = self.clone();
        for name in columns {
            let name = name.as_ref();
            if !out.columns.iter().any(|c| c == name) {
                out.columns.push(name.to_string());
            }
        }

        for rec in out.records.iter_mut() {
            if let Some(src) = other.get(&rec.id) {
                for name in columns {
                    let name = name.as_ref();
                    let value = src.value(name).cloned().unwrap_or(AttributeValue::Null);
                    rec.set_value(name, value);
                }
            }
        }

        Ok(out)
    }
}

impl IntoIterator for SubcatchmentTable {
    type Item = Subcatchment;
    type IntoIter = std::vec::IntoIter<Subcatchment>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a SubcatchmentTable {
    type Item = &'a Subcatchment;
    type IntoIter = std::slice::Iter<'a, Subcatchment>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
