//! Key supplier for node- and block-keyed sidetables.
//!
//! Node-keyed tables only need to know *which* graph their keys come from;
//! they never read the graph's contents. [`TableGraph`] is that narrow
//! interface. [`Graph`] is a minimal implementation that hands out dense
//! identifiers, enough to drive phases and tests without a full IR.

use super::index::{BlockIndex, GraphId, OpIndex};

/// A graph whose operation indices can key a sidetable.
pub trait TableGraph {
    /// Identity of this graph instance.
    fn graph_id(&self) -> GraphId;
}

/// Dense identifier allocator standing in for an IR graph.
///
/// Operations and blocks are numbered from zero in issue order. Resetting
/// the graph starts numbering over and takes a fresh [`GraphId`], so any
/// [`OpIndex`] issued before the reset is recognisably stale in debug builds.
#[derive(Debug)]
pub struct Graph {
    id: GraphId,
    op_count: u32,
    block_count: u32,
}

impl Graph {
    pub fn new() -> Self {
        let id = GraphId::fresh();
        log::trace!("created graph {:?}", id);
        Self {
            id,
            op_count: 0,
            block_count: 0,
        }
    }

    /// Issue the next operation index.
    pub fn add_op(&mut self) -> OpIndex {
        let index = OpIndex::new_in(self.id, self.op_count);
        debug_assert!(index.valid(), "operation index space exhausted");
        self.op_count += 1;
        index
    }

    /// Issue the next block index.
    pub fn add_block(&mut self) -> BlockIndex {
        let index = BlockIndex::new(self.block_count);
        debug_assert!(index.valid(), "block index space exhausted");
        self.block_count += 1;
        index
    }

    pub fn op_count(&self) -> usize {
        self.op_count as usize
    }

    pub fn block_count(&self) -> usize {
        self.block_count as usize
    }

    /// All operation indices issued so far, in order.
    pub fn op_indices(&self) -> impl Iterator<Item = OpIndex> + '_ {
        (0..self.op_count).map(move |offset| OpIndex::new_in(self.id, offset))
    }

    /// All block indices issued so far, in order.
    pub fn block_indices(&self) -> impl Iterator<Item = BlockIndex> {
        (0..self.block_count).map(BlockIndex::new)
    }

    /// Drop all operations and blocks and take a new identity.
    pub fn reset(&mut self) {
        let old = self.id;
        self.id = GraphId::fresh();
        self.op_count = 0;
        self.block_count = 0;
        log::debug!("graph {:?} reset as {:?}", old, self.id);
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl TableGraph for Graph {
    fn graph_id(&self) -> GraphId {
        self.id
    }
}
