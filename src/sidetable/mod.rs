//! Sidetables: per-node and per-block scratch data kept outside the IR.
//!
//! Compiler phases often need a value per operation or per block that lives
//! only as long as the phase. Storing that on the IR records would bloat
//! every node, so it lives in a sidetable instead: a dense array indexed by
//! the entity's identifier and allocated from the phase's arena.
//!
//! # Table kinds
//!
//! | | grows on access | fixed size |
//! |---|---|---|
//! | keyed by [`BlockIndex`](crate::ir::BlockIndex) | [`GrowingBlockSidetable`] | [`FixedBlockSidetable`] |
//! | keyed by [`OpIndex`](crate::ir::OpIndex) | [`GrowingOpIndexSidetable`] | [`FixedOpIndexSidetable`] |
//!
//! Growing tables materialize slots on demand, so every valid key maps to
//! some value. Because even a read may grow the table, their accessors take
//! `&mut self` and references never survive a call. Fixed tables never
//! reallocate.
//!
//! Operation-keyed tables additionally check, in debug builds only, that
//! every key was issued by the graph the table was created for.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use sidetable::ir::Graph;
//! use sidetable::sidetable::GrowingOpIndexSidetable;
//!
//! let arena = Bump::new();
//! let mut graph = Graph::new();
//! let op = graph.add_op();
//!
//! let mut live = GrowingOpIndexSidetable::<bool>::new(&arena, &graph);
//! *live.get_mut(op) = true;
//! assert!(*live.get(op));
//!
//! live.reset();
//! assert!(!*live.get(op));
//! ```

mod binding;
pub mod block;
pub mod fixed;
pub mod growing;
pub mod op_index;

pub use block::{FixedBlockSidetable, GrowingBlockSidetable};
pub use fixed::FixedSidetable;
pub use growing::GrowingSidetable;
pub use op_index::{FixedOpIndexSidetable, GrowingOpIndexSidetable};
