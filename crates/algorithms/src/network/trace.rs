//! Upstream trace
//!
//! Selects every subcatchment transitively upstream of a starting row,
//! i.e. every row whose downstream chain passes through it. The result is
//! a filter of the input table: relative row order is preserved and the
//! starting row itself is excluded.

use crate::network::NetworkIndex;
use propagator_core::{Algorithm, Error, Result, SubcatchmentTable};
use std::collections::HashSet;

/// Parameters for the upstream trace
#[derive(Debug, Clone, Default)]
pub struct TraceUpstreamParams {
    /// Id of the subcatchment to trace upstream from
    pub start_id: String,
}

/// Upstream trace algorithm
#[derive(Debug, Clone, Default)]
pub struct TraceUpstream;

impl Algorithm for TraceUpstream {
    type Input = SubcatchmentTable;
    type Output = SubcatchmentTable;
    type Params = TraceUpstreamParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Trace Upstream"
    }

    fn description(&self) -> &'static str {
        "Select all subcatchments draining through a given subcatchment"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        trace_upstream(&input, &params.start_id)
    }
}

/// Select all subcatchments transitively upstream of `start_id`.
///
/// # Algorithm
/// Grow a membership set seeded with `start_id`: each pass adds every row
/// whose downstream reference is already a member, until a pass adds
/// nothing. The returned table is the order-preserving subset of rows in
/// the final set, minus `start_id` itself.
///
/// Membership can only grow, so on acyclic input the loop needs at most
/// one pass per row; exceeding that bound means the table contains a
/// cycle and the trace fails instead of spinning.
///
/// # Errors
/// - `UnknownSubcatchment` if `start_id` is not an id in the table
/// - `CyclicStructure` if the pass bound is exceeded
pub fn trace_upstream(table: &SubcatchmentTable, start_id: &str) -> Result<SubcatchmentTable> {
    let index = NetworkIndex::build(table);
    if !index.contains(start_id) {
        return Err(Error::UnknownSubcatchment {
            id: start_id.to_string(),
        });
    }

    let mut members: HashSet<&str> = HashSet::new();
    members.insert(start_id);

    let max_passes = table.len() + 1;
    let mut passes = 0usize;

    loop {
        let mut grew = false;
        for record in table.iter() {
            if members.contains(record.id.as_str()) {
                continue;
            }
            if members.contains(record.downstream.as_str()) {
                members.insert(record.id.as_str());
                grew = true;
            }
        }

        if !grew {
            break;
        }

        passes += 1;
        if passes > max_passes {
            return Err(Error::CyclicStructure { passes });
        }
    }

    Ok(table.filter(|r| r.id != start_id && members.contains(r.id.as_str())))
}
