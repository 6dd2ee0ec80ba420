//! IR identifiers and the graph interface sidetables are keyed against.
//!
//! The sidetables themselves never look inside a graph. They need dense keys
//! ([`OpIndex`], [`BlockIndex`]) and, for node-keyed tables, the identity of
//! the graph those keys were issued by ([`TableGraph`]).

pub mod graph;
pub mod index;

pub use graph::{Graph, TableGraph};
pub use index::{BlockIndex, GraphId, KeyKind, OpIndex, SidetableKey};
