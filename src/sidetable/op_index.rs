// This module provides the node-keyed sidetables. GrowingOpIndexSidetable and
// FixedOpIndexSidetable wrap the generic containers at OpIndex and remember, in debug builds
// only, the identity of the graph they were created for. Every access first checks that the
// key was issued by that graph, which catches the classic phase-pipeline bug of indexing a
// table with identifiers from a rebuilt or different graph. In release builds the binding is
// zero-sized and the check disappears. swap_data exchanges storage only; each table keeps
// its own binding.

//! Sidetables keyed by graph operation indices.

use super::binding::GraphBinding;
use super::fixed::FixedSidetable;
use super::growing::GrowingSidetable;
use crate::core::error::SidetableResult;
use crate::ir::{OpIndex, TableGraph};
use bumpalo::Bump;
use std::ops::{Index, IndexMut};

/// Auto-growing table from [`OpIndex`] to `T`, bound to one graph.
pub struct GrowingOpIndexSidetable<'arena, T> {
    base: GrowingSidetable<'arena, T, OpIndex>,
    binding: GraphBinding,
}

impl<'arena, T: Default> GrowingOpIndexSidetable<'arena, T> {
    pub fn new<G: TableGraph + ?Sized>(arena: &'arena Bump, graph: &G) -> Self {
        Self {
            base: GrowingSidetable::new_in(arena),
            binding: GraphBinding::new(graph),
        }
    }

    pub fn with_initial<G: TableGraph + ?Sized>(
        size: usize,
        initial_value: T,
        arena: &'arena Bump,
        graph: &G,
    ) -> Self
    where
        T: Clone,
    {
        Self {
            base: GrowingSidetable::with_initial_in(size, initial_value, arena),
            binding: GraphBinding::new(graph),
        }
    }

    /// Slot for `index`, growing the table if needed.
    #[inline]
    pub fn get(&mut self, index: OpIndex) -> &T {
        self.binding.check(index);
        self.base.get(index)
    }

    /// Mutable slot for `index`, growing the table if needed.
    #[inline]
    pub fn get_mut(&mut self, index: OpIndex) -> &mut T {
        self.binding.check(index);
        self.base.get_mut(index)
    }

    pub fn get_existing(&self, index: OpIndex) -> Option<&T> {
        self.binding.check(index);
        self.base.get_existing(index)
    }

    pub fn reset(&mut self) {
        self.base.reset();
    }

    /// `true` if the table never held a slot, even before a reset.
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Raw slots by offset. No graph binding check is involved.
    pub fn values(&self) -> &[T] {
        self.base.values()
    }

    /// Mutable raw slots by offset. Does not grow the table.
    pub fn values_mut(&mut self) -> &mut [T] {
        self.base.values_mut()
    }

    /// Exchange backing storage with `other`. Graph bindings stay in place.
    pub fn swap_data(&mut self, other: &mut Self) {
        self.base.swap_data(&mut other.base);
    }
}

/// Fixed-size table from [`OpIndex`] to `T`, bound to one graph.
pub struct FixedOpIndexSidetable<'arena, T> {
    base: FixedSidetable<'arena, T, OpIndex>,
    binding: GraphBinding,
}

impl<'arena, T> FixedOpIndexSidetable<'arena, T> {
    pub fn new<G: TableGraph + ?Sized>(size: usize, arena: &'arena Bump, graph: &G) -> Self
    where
        T: Default,
    {
        Self {
            base: FixedSidetable::new_in(size, arena),
            binding: GraphBinding::new(graph),
        }
    }

    pub fn with_initial<G: TableGraph + ?Sized>(
        size: usize,
        initial_value: T,
        arena: &'arena Bump,
        graph: &G,
    ) -> Self
    where
        T: Clone,
    {
        Self {
            base: FixedSidetable::with_initial_in(size, initial_value, arena),
            binding: GraphBinding::new(graph),
        }
    }

    #[inline]
    pub fn get(&self, index: OpIndex) -> &T {
        self.binding.check(index);
        self.base.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: OpIndex) -> &mut T {
        self.binding.check(index);
        self.base.get_mut(index)
    }

    pub fn checked_get(&self, index: OpIndex) -> SidetableResult<&T> {
        self.binding.check(index);
        self.base.checked_get(index)
    }

    pub fn checked_get_mut(&mut self, index: OpIndex) -> SidetableResult<&mut T> {
        self.binding.check(index);
        self.base.checked_get_mut(index)
    }

    pub fn reset(&mut self)
    where
        T: Default,
    {
        self.base.reset();
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.base.fill(value);
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Raw slots by offset. No graph binding check is involved.
    pub fn values(&self) -> &[T] {
        self.base.values()
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        self.base.values_mut()
    }

    /// Exchange backing storage with `other`. Graph bindings stay in place.
    pub fn swap_data(&mut self, other: &mut Self) {
        self.base.swap_data(&mut other.base);
    }
}

impl<T> Index<OpIndex> for FixedOpIndexSidetable<'_, T> {
    type Output = T;

    fn index(&self, index: OpIndex) -> &T {
        self.get(index)
    }
}

impl<T> IndexMut<OpIndex> for FixedOpIndexSidetable<'_, T> {
    fn index_mut(&mut self, index: OpIndex) -> &mut T {
        self.get_mut(index)
    }
}
