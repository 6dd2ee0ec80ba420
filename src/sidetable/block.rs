//! Block-keyed sidetables.
//!
//! Blocks carry no graph provenance, so these are the generic containers
//! instantiated at [`BlockIndex`] with public constructors.

use super::fixed::FixedSidetable;
use super::growing::GrowingSidetable;
use crate::ir::BlockIndex;
use bumpalo::Bump;

/// Auto-growing table from [`BlockIndex`] to `T`.
pub type GrowingBlockSidetable<'arena, T> = GrowingSidetable<'arena, T, BlockIndex>;

/// Fixed-size table from [`BlockIndex`] to `T`.
pub type FixedBlockSidetable<'arena, T> = FixedSidetable<'arena, T, BlockIndex>;

impl<'arena, T: Default> GrowingSidetable<'arena, T, BlockIndex> {
    /// Empty table; storage is taken from `arena` on first access.
    pub fn new(arena: &'arena Bump) -> Self {
        Self::new_in(arena)
    }

    /// Table with `size` slots preset to `initial_value`.
    pub fn with_initial(size: usize, initial_value: T, arena: &'arena Bump) -> Self
    where
        T: Clone,
    {
        Self::with_initial_in(size, initial_value, arena)
    }
}

impl<'arena, T> FixedSidetable<'arena, T, BlockIndex> {
    pub fn new(size: usize, arena: &'arena Bump) -> Self
    where
        T: Default,
    {
        Self::new_in(size, arena)
    }

    pub fn with_initial(size: usize, initial_value: T, arena: &'arena Bump) -> Self
    where
        T: Clone,
    {
        Self::with_initial_in(size, initial_value, arena)
    }
}
