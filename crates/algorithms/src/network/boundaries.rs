//! Boundary detection
//!
//! Two single-pass filters over the forest: `find_edges` selects the rows
//! draining directly to a given terminal outfall (the roots of trees), and
//! `find_tops` selects the headwater rows no other row drains into (the
//! leaves). Neither walks chains; both are one pass over the table plus a
//! set-membership index.

use crate::network::NetworkIndex;
use propagator_core::{Algorithm, Error, Result, SubcatchmentTable};

/// Parameters for edge detection
#[derive(Debug, Clone)]
pub struct FindEdgesParams {
    /// Terminal sentinel marking the network outfall
    pub outfall: String,
}

impl Default for FindEdgesParams {
    fn default() -> Self {
        Self {
            outfall: "Ocean".to_string(),
        }
    }
}

/// Edge detection algorithm
#[derive(Debug, Clone, Default)]
pub struct FindEdges;

impl Algorithm for FindEdges {
    type Input = SubcatchmentTable;
    type Output = SubcatchmentTable;
    type Params = FindEdgesParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Find Edges"
    }

    fn description(&self) -> &'static str {
        "Select subcatchments draining directly to a terminal outfall"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        Ok(find_edges(&input, &params.outfall))
    }
}

/// Headwater detection algorithm
#[derive(Debug, Clone, Default)]
pub struct FindTops;

impl Algorithm for FindTops {
    type Input = SubcatchmentTable;
    type Output = SubcatchmentTable;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "Find Tops"
    }

    fn description(&self) -> &'static str {
        "Select headwater subcatchments that nothing drains into"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        Ok(find_tops(&input))
    }
}

/// Select the rows whose downstream reference equals the given terminal
/// sentinel. These are the outfall-adjacent rows, one per tree.
pub fn find_edges(table: &SubcatchmentTable, outfall: &str) -> SubcatchmentTable {
    table.filter(|r| r.downstream == outfall)
}

/// Select the rows whose id is never referenced as another row's
/// downstream neighbor. These are the headwater (leaf) rows.
pub fn find_tops(table: &SubcatchmentTable) -> SubcatchmentTable {
    let index = NetworkIndex::build(table);
    table.filter(|r| !index.is_referenced(&r.id))
}
