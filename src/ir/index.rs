// This module defines the dense identifier types that sidetables are keyed by. OpIndex names
// an operation (node) in an IR graph and BlockIndex names a basic block; both are plain u32
// offsets with a u32::MAX sentinel for "no such entity". GraphId is the process-unique
// identity of a graph instance, issued from a global counter. In debug builds every OpIndex
// handed out by a graph remembers the GraphId it came from so that node-keyed tables can
// detect identifiers leaking in from another (or a rebuilt) graph; in release builds that
// field does not exist and OpIndex is a bare u32. SidetableKey is a sealed trait: only the
// two key kinds defined here can key a table.

//! Dense IR identifiers used as sidetable keys.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{self, AtomicU32};

/// Source of fresh graph identities. Zero is reserved for "no graph".
static NEXT_GRAPH_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one graph instance.
///
/// Two graphs never share an id, and a graph that is reset takes a new one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u32);

impl GraphId {
    /// Placeholder identity for identifiers of unknown origin.
    pub const NONE: GraphId = GraphId(0);

    /// Issue a new, never before seen graph identity.
    pub fn fresh() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }

    /// Raw numeric value, mostly useful for logging.
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "g<none>")
        } else {
            write!(f, "g{}", self.0)
        }
    }
}

/// Which identifier domain a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Op,
    Block,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Op => write!(f, "op"),
            KeyKind::Block => write!(f, "block"),
        }
    }
}

const INVALID_ID: u32 = u32::MAX;

/// Identifier of an operation (node) in an IR graph.
///
/// Comparison and hashing look at the offset only, so keys behave the same
/// in every build profile.
#[derive(Clone, Copy)]
pub struct OpIndex {
    offset: u32,
    #[cfg(debug_assertions)]
    origin: GraphId,
}

impl OpIndex {
    /// Create an index with no recorded origin graph.
    pub const fn new(offset: u32) -> Self {
        Self {
            offset,
            #[cfg(debug_assertions)]
            origin: GraphId::NONE,
        }
    }

    /// Create an index issued by `graph`.
    ///
    /// The origin is only retained in debug builds.
    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub const fn new_in(graph: GraphId, offset: u32) -> Self {
        Self {
            offset,
            #[cfg(debug_assertions)]
            origin: graph,
        }
    }

    /// The sentinel index. Never valid for table access.
    pub const fn invalid() -> Self {
        Self::new(INVALID_ID)
    }

    pub const fn valid(self) -> bool {
        self.offset != INVALID_ID
    }

    pub const fn id(self) -> usize {
        self.offset as usize
    }

    /// Graph that issued this index, if known.
    #[cfg(debug_assertions)]
    pub const fn origin(self) -> GraphId {
        self.origin
    }
}

impl PartialEq for OpIndex {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for OpIndex {}

impl Hash for OpIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

impl PartialOrd for OpIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl Default for OpIndex {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Debug for OpIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid() {
            return write!(f, "op<invalid>");
        }
        write!(f, "op{}", self.offset)?;
        #[cfg(debug_assertions)]
        {
            if !self.origin.is_none() {
                write!(f, "@{:?}", self.origin)?;
            }
        }
        Ok(())
    }
}

/// Identifier of a basic block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockIndex(u32);

impl BlockIndex {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn invalid() -> Self {
        Self(INVALID_ID)
    }

    pub const fn valid(self) -> bool {
        self.0 != INVALID_ID
    }

    pub const fn id(self) -> usize {
        self.0 as usize
    }
}

impl Default for BlockIndex {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Debug for BlockIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid() {
            write!(f, "b{}", self.0)
        } else {
            write!(f, "b<invalid>")
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::OpIndex {}
    impl Sealed for super::BlockIndex {}
}

/// Key usable for sidetable lookup.
///
/// Implemented for [`OpIndex`] and [`BlockIndex`] only.
pub trait SidetableKey: Copy + fmt::Debug + sealed::Sealed {
    const KIND: KeyKind;

    fn valid(self) -> bool;

    fn id(self) -> usize;
}

impl SidetableKey for OpIndex {
    const KIND: KeyKind = KeyKind::Op;

    #[inline]
    fn valid(self) -> bool {
        OpIndex::valid(self)
    }

    #[inline]
    fn id(self) -> usize {
        OpIndex::id(self)
    }
}

impl SidetableKey for BlockIndex {
    const KIND: KeyKind = KeyKind::Block;

    #[inline]
    fn valid(self) -> bool {
        BlockIndex::valid(self)
    }

    #[inline]
    fn id(self) -> usize {
        BlockIndex::id(self)
    }
}
