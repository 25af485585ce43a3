//! # Propagator Algorithms
//!
//! The forest propagation engine for subcatchment drainage networks.
//!
//! A subcatchment table is an implicit forest: every row names one
//! downstream neighbor, and chains of references end at terminal sentinels
//! (outfalls). The `network` module answers structural and value-propagation
//! queries over that forest:
//!
//! - **trace_upstream**: everything draining through a given subcatchment
//! - **find_edges / find_tops**: outfall-adjacent and headwater rows
//! - **propagate_scores**: nearest-valid-downstream value substitution
//! - **remove_orphan_subcatchments**: drop rows cut off from the outfall
//! - **mark_edges**: make dangling downstream references explicit

pub mod network;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::network::{
        find_edges, find_tops, mark_edges, nearest_downstream_value, propagate_scores,
        remove_orphan_subcatchments, trace_upstream, FindEdges, FindEdgesParams, FindTops,
        MarkEdges, MarkEdgesParams, NetworkIndex, PropagateScores, PropagateScoresParams,
        RemoveOrphanSubcatchments, RemoveOrphanSubcatchmentsParams, TraceUpstream,
        TraceUpstreamParams,
    };
    pub use propagator_core::prelude::*;
}
