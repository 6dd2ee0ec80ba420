//! Debug-only association between a node-keyed table and its graph.
//!
//! In release builds [`GraphBinding`] is zero-sized and [`GraphBinding::check`]
//! is empty, so node-keyed tables cost exactly what block-keyed ones do.

use crate::ir::{OpIndex, TableGraph};
#[cfg(debug_assertions)]
use crate::ir::GraphId;

/// Whether `index` may be used with a table bound to `graph`.
///
/// Indices without a recorded origin are accepted.
#[cfg(debug_assertions)]
pub(crate) fn op_index_belongs_to_table_graph(graph: GraphId, index: OpIndex) -> bool {
    let origin = index.origin();
    origin.is_none() || origin == graph
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct GraphBinding {
    #[cfg(debug_assertions)]
    graph: GraphId,
}

impl GraphBinding {
    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub(crate) fn new<G: TableGraph + ?Sized>(graph: &G) -> Self {
        Self {
            #[cfg(debug_assertions)]
            graph: graph.graph_id(),
        }
    }

    #[inline(always)]
    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub(crate) fn check(&self, index: OpIndex) {
        #[cfg(debug_assertions)]
        {
            assert!(
                op_index_belongs_to_table_graph(self.graph, index),
                "{:?} does not belong to sidetable graph {:?}",
                index,
                self.graph
            );
        }
    }
}
