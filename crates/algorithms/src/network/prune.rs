//! Orphan pruning
//!
//! Removes subcatchments that no longer reach the designated outfall
//! through an unbroken downstream chain. Removing one row can disconnect
//! the rows that drained through it, so retention is a fixpoint: passes
//! repeat until nothing more drops out. Whole branches whose only path to
//! the outfall ran through a missing row are removed together.

use propagator_core::{Algorithm, Error, Result, SubcatchmentTable};
use std::collections::HashSet;

/// Parameters for orphan pruning
#[derive(Debug, Clone)]
pub struct RemoveOrphanSubcatchmentsParams {
    /// Terminal sentinel every retained row must reach
    pub bottom_id: String,
}

impl Default for RemoveOrphanSubcatchmentsParams {
    fn default() -> Self {
        Self {
            bottom_id: "Ocean".to_string(),
        }
    }
}

/// Orphan pruning algorithm
#[derive(Debug, Clone, Default)]
pub struct RemoveOrphanSubcatchments;

impl Algorithm for RemoveOrphanSubcatchments {
    type Input = SubcatchmentTable;
    type Output = SubcatchmentTable;
    type Params = RemoveOrphanSubcatchmentsParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Remove Orphan Subcatchments"
    }

    fn description(&self) -> &'static str {
        "Drop subcatchments whose path to the outfall is broken"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        remove_orphan_subcatchments(&input, &params.bottom_id)
    }
}

/// Remove every row not connected to `bottom_id` by an unbroken chain.
///
/// # Algorithm
/// Start with all rows retained; each pass keeps only the rows whose
/// downstream reference is `bottom_id` or the id of a row retained by the
/// previous pass, until a pass removes nothing. The retained set can only
/// shrink, so an acyclic table stabilizes within one pass per row; the
/// pass bound guards against malformed cyclic input.
///
/// Re-running the operation on its own output is a no-op: the output is
/// already a fixpoint.
pub fn remove_orphan_subcatchments(
    table: &SubcatchmentTable,
    bottom_id: &str,
) -> Result<SubcatchmentTable> {
    let mut retained: HashSet<&str> = table.iter().map(|r| r.id.as_str()).collect();

    let max_passes = table.len() + 1;
    let mut passes = 0usize;

    loop {
        let next: HashSet<&str> = table
            .iter()
            .filter(|r| retained.contains(r.id.as_str()))
            .filter(|r| r.downstream == bottom_id || retained.contains(r.downstream.as_str()))
            .map(|r| r.id.as_str())
            .collect();

        if next.len() == retained.len() {
            break;
        }
        retained = next;

        passes += 1;
        if passes > max_passes {
            return Err(Error::CyclicStructure { passes });
        }
    }

    Ok(table.filter(|r| retained.contains(r.id.as_str())))
}
