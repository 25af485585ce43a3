//! Edge re-marking
//!
//! After structural edits (rows deleted by hand, a table split along a
//! watershed boundary) some downstream references point at ids that are no
//! longer present. `mark_edges` rewrites every such dangling reference,
//! original terminal sentinels included, to a single explicit edge
//! sentinel. One pass, no fixpoint: rows are relabeled, never removed.

use crate::network::NetworkIndex;
use propagator_core::{Algorithm, Error, Result, SubcatchmentTable};

/// Parameters for edge re-marking
#[derive(Debug, Clone)]
pub struct MarkEdgesParams {
    /// Sentinel written over every dangling downstream reference
    pub edge_id: String,
}

impl Default for MarkEdgesParams {
    fn default() -> Self {
        Self {
            edge_id: "EDGE".to_string(),
        }
    }
}

/// Edge re-marking algorithm
#[derive(Debug, Clone, Default)]
pub struct MarkEdges;

impl Algorithm for MarkEdges {
    type Input = SubcatchmentTable;
    type Output = SubcatchmentTable;
    type Params = MarkEdgesParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Mark Edges"
    }

    fn description(&self) -> &'static str {
        "Relabel downstream references that point outside the table"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        Ok(mark_edges(&input, &params.edge_id))
    }
}

/// Rewrite every downstream reference that does not match a current id to
/// `edge_id`.
///
/// `edge_id` never appears as an id itself, so a second application finds
/// nothing new to rewrite: the operation is idempotent.
pub fn mark_edges(table: &SubcatchmentTable, edge_id: &str) -> SubcatchmentTable {
    let index = NetworkIndex::build(table);

    let mut out = table.clone();
    for record in out.iter_mut() {
        if !index.contains(&record.downstream) {
            record.downstream = edge_id.to_string();
        }
    }

    out
}
