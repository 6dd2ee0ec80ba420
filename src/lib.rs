//! Sidetable - arena-scoped per-node and per-block compiler data.
//!
//! Compiler phases keep transient facts about IR entities (liveness, types,
//! scheduling state) in sidetables: dense arrays indexed by operation or
//! block identifier, allocated from the phase's arena rather than stored on
//! the IR records themselves.
//!
//! # Primary Usage
//!
//! ```
//! use bumpalo::Bump;
//! use sidetable::core::PhaseSession;
//! use sidetable::ir::Graph;
//!
//! let arena = Bump::new();
//! let session = PhaseSession::new(&arena);
//! let mut graph = Graph::new();
//! let op = graph.add_op();
//!
//! session.begin_phase("liveness")?;
//! let mut live = session.growing_op_table::<bool, _>(&graph);
//! *live.get_mut(op) = true;
//! let report = session.end_phase()?;
//! assert_eq!(report.tables_created, 1);
//! # Ok::<(), sidetable::core::SessionError>(())
//! ```
//!
//! # Architecture
//!
//! - [`sidetable`] - Growing and fixed tables for both key kinds
//! - [`ir`] - Operation/block identifiers and the graph interface
//! - [`core`] - Phase session, statistics and error types

pub mod core;
pub mod ir;
pub mod sidetable;

pub use crate::core::{
    PhaseReport, PhaseSession, SessionError, SessionStats, SidetableError, SidetableResult,
};
pub use crate::ir::{BlockIndex, Graph, GraphId, KeyKind, OpIndex, SidetableKey, TableGraph};
pub use crate::sidetable::{
    FixedBlockSidetable, FixedOpIndexSidetable, GrowingBlockSidetable, GrowingOpIndexSidetable,
};
