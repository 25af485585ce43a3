//! Drainage-network analysis algorithms
//!
//! Structural and value-propagation queries over a subcatchment forest:
//! - Upstream trace: all rows whose flow passes through a given row
//! - Boundary detection: outfall-adjacent rows (edges) and headwaters (tops)
//! - Score propagation: fill no-data cells from the nearest valid
//!   downstream measurement
//! - Orphan pruning: drop rows whose path to the outfall is broken
//! - Edge re-marking: relabel downstream references that point outside
//!   the table
//!
//! Every operation is a pure function: it borrows a table and returns a
//! new one, preserving input row order.

mod boundaries;
mod index;
mod mark;
mod propagate;
mod prune;
mod trace;

pub use boundaries::{find_edges, find_tops, FindEdges, FindEdgesParams, FindTops};
pub use index::NetworkIndex;
pub use mark::{mark_edges, MarkEdges, MarkEdgesParams};
pub use propagate::{
    nearest_downstream_value, propagate_scores, PropagateScores, PropagateScoresParams,
};
pub use prune::{
    remove_orphan_subcatchments, RemoveOrphanSubcatchments, RemoveOrphanSubcatchmentsParams,
};
pub use trace::{trace_upstream, TraceUpstream, TraceUpstreamParams};
