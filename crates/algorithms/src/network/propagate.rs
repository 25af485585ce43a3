//! Score propagation
//!
//! Fills no-data cells in one value column from the nearest valid
//! measurement downstream. A cell equal to the ignored sentinel is
//! replaced by the first non-ignored value found walking the downstream
//! chain; if the chain leaves the table (terminal sentinel) without a hit,
//! the cell keeps the sentinel.
//!
//! Every chain walk reads the original input table, never values already
//! rewritten in the same pass, so results do not depend on row processing
//! order. Multiple columns are propagated independently by repeated calls.

use crate::network::NetworkIndex;
use propagator_core::{Algorithm, AttributeValue, Error, Result, SubcatchmentTable};

const NULL: AttributeValue = AttributeValue::Null;

/// Parameters for score propagation
#[derive(Debug, Clone)]
pub struct PropagateScoresParams {
    /// Name of the value column to propagate
    pub value_column: String,
    /// Sentinel meaning "no valid measurement here".
    ///
    /// Compared by typed equality: a numeric sentinel never matches a
    /// text cell, and `Int(0)` never matches `Float(0.0)`.
    pub ignored_value: AttributeValue,
}

impl Default for PropagateScoresParams {
    fn default() -> Self {
        Self {
            value_column: String::new(),
            ignored_value: AttributeValue::Null,
        }
    }
}

/// Score propagation algorithm
#[derive(Debug, Clone, Default)]
pub struct PropagateScores;

impl Algorithm for PropagateScores {
    type Input = SubcatchmentTable;
    type Output = SubcatchmentTable;
    type Params = PropagateScoresParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Propagate Scores"
    }

    fn description(&self) -> &'static str {
        "Fill no-data cells from the nearest valid downstream measurement"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        propagate_scores(&input, &params.value_column, &params.ignored_value)
    }
}

/// Propagate one value column through the forest.
///
/// For every row, the output cell is:
/// - the row's own value, when it differs from `ignored`;
/// - otherwise the first non-ignored value on the downstream chain,
///   skipping ignored intermediates;
/// - `ignored` unchanged, when the chain reaches a terminal sentinel
///   without finding a valid value.
///
/// A cell with no entry for the column at all is treated as `Null`.
///
/// # Errors
/// - `MissingColumn` when `value_col` is not in the table schema; raised
///   before any computation
/// - `CyclicStructure` when a chain walk runs longer than the table
pub fn propagate_scores(
    table: &SubcatchmentTable,
    value_col: &str,
    ignored: &AttributeValue,
) -> Result<SubcatchmentTable> {
    table.check_columns(&[value_col])?;
    let index = NetworkIndex::build(table);

    let mut out = table.clone();
    for record in out.iter_mut() {
        if record.value(value_col).unwrap_or(&NULL) != ignored {
            continue;
        }
        // Lookups go against `table`, the untouched input snapshot.
        if let Some(found) = nearest_downstream_value(table, &index, &record.id, value_col, ignored)?
        {
            record.set_value(value_col, found.clone());
        }
    }

    Ok(out)
}

/// Find the nearest valid value strictly downstream of `id`.
///
/// Walks the chain starting at the row's downstream neighbor, skipping
/// every row whose cell equals `ignored`, and returns the first valid
/// value. `None` means the chain reached a terminal sentinel first. This
/// is the atomic query `propagate_scores` composes over every row.
///
/// # Errors
/// - `UnknownSubcatchment` if `id` is not in the table
/// - `CyclicStructure` if the walk visits more rows than the table holds
pub fn nearest_downstream_value<'t>(
    table: &'t SubcatchmentTable,
    index: &NetworkIndex,
    id: &str,
    value_col: &str,
    ignored: &AttributeValue,
) -> Result<Option<&'t AttributeValue>> {
    let start = index
        .position(id)
        .ok_or_else(|| Error::UnknownSubcatchment { id: id.to_string() })?;

    let mut next = table.records()[start].downstream.as_str();
    let mut steps = 0usize;

    while let Some(pos) = index.position(next) {
        steps += 1;
        if steps > table.len() {
            return Err(Error::CyclicStructure { passes: steps });
        }

        let record = &table.records()[pos];
        let value = record.value(value_col).unwrap_or(&NULL);
        if value != ignored {
            return Ok(Some(value));
        }
        next = record.downstream.as_str();
    }

    Ok(None)
}
