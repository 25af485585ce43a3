//! Per-call lookup index over a subcatchment table

use propagator_core::SubcatchmentTable;
use std::collections::{HashMap, HashSet};

/// Lookup structures built once at the start of an engine operation.
///
/// Chain walks and fixpoint loops run against this index instead of
/// scanning the table per step, and iterate instead of recursing so deep
/// networks cannot grow the stack.
///
/// Ids are assumed unique in the table; with duplicates the last row wins,
/// which is the caller's precondition violation, not a checked error.
#[derive(Debug, Clone)]
pub struct NetworkIndex {
    positions: HashMap<String, usize>,
    referenced: HashSet<String>,
}

impl NetworkIndex {
    /// Build the index in one pass over the table
    pub fn build(table: &SubcatchmentTable) -> Self {
        let mut positions = HashMap::with_capacity(table.len());
        let mut referenced = HashSet::with_capacity(table.len());

        for (pos, record) in table.iter().enumerate() {
            positions.insert(record.id.clone(), pos);
            referenced.insert(record.downstream.clone());
        }

        Self {
            positions,
            referenced,
        }
    }

    /// Row position of the record with the given id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Whether the id names a record in the table
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Whether any record names this id as its downstream neighbor
    pub fn is_referenced(&self, id: &str) -> bool {
        self.referenced.contains(id)
    }
}
