//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::graph::{Graph, Node};

impl Graph {
    /// Callers have already checked `contains` or just inserted the node.
    pub(crate) fn ensure_node_mut(&mut self, id: &str) -> &mut Node {
        self.nodes_mut().get_mut(id).unwrap_or_else(|| {
            panic!("Graph: node `{id}` vanished between lookup and mutation")
        })
    }
}
