// This module implements the auto-growing sidetable: a conceptually infinite mapping from a
// dense key to a value, backed by an arena vector. Any access at or past the current size
// first grows the storage to `i + i/2 + 32` slots and then on to whatever capacity the arena
// vector actually reserved, default-initializing every new slot, so untouched keys always
// read back as T::default(). Because reads can grow, both accessors take &mut self and no
// reference survives a call. Reset rewrites all slots with the default value but keeps the
// storage for the next phase; swap_data exchanges backing buffers in O(1).

//! Auto-growing sidetable.

use crate::ir::SidetableKey;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use std::marker::PhantomData;
use std::{iter, mem};

/// Sidetable that grows on out-of-bounds access.
///
/// Use [`GrowingBlockSidetable`](super::GrowingBlockSidetable) or
/// [`GrowingOpIndexSidetable`](super::GrowingOpIndexSidetable) to create one.
pub struct GrowingSidetable<'arena, T, K: SidetableKey> {
    table: BumpVec<'arena, T>,
    _key: PhantomData<K>,
}

impl<'arena, T: Default, K: SidetableKey> GrowingSidetable<'arena, T, K> {
    /// Slack added on top of the 1.5x growth factor.
    pub const GROWTH_SLACK: usize = 32;

    pub(super) fn new_in(arena: &'arena Bump) -> Self {
        Self {
            table: BumpVec::new_in(arena),
            _key: PhantomData,
        }
    }

    pub(super) fn with_initial_in(size: usize, initial_value: T, arena: &'arena Bump) -> Self
    where
        T: Clone,
    {
        Self {
            table: BumpVec::from_iter_in(iter::repeat(initial_value).take(size), arena),
            _key: PhantomData,
        }
    }

    /// Size the table grows to when `index` is out of bounds.
    ///
    /// Saturates instead of wrapping for indices near `usize::MAX`.
    pub fn next_size(index: usize) -> usize {
        index
            .saturating_add(index / 2)
            .saturating_add(Self::GROWTH_SLACK)
    }

    /// Shared reference to the slot for `key`, growing the table if needed.
    #[inline]
    pub fn get(&mut self, key: K) -> &T {
        let i = self.ensure_slot(key);
        &self.table[i]
    }

    /// Mutable reference to the slot for `key`, growing the table if needed.
    #[inline]
    pub fn get_mut(&mut self, key: K) -> &mut T {
        let i = self.ensure_slot(key);
        &mut self.table[i]
    }

    /// Read a slot without growing. `None` if `key` was never materialized.
    pub fn get_existing(&self, key: K) -> Option<&T> {
        debug_assert!(key.valid(), "invalid {} index used for sidetable access", K::KIND);
        self.table.get(key.id())
    }

    /// Fill every slot with `T::default()`, keeping the storage.
    pub fn reset(&mut self) {
        log::trace!("resetting {} sidetable of {} slots", K::KIND, self.table.len());
        self.table.fill_with(T::default);
    }

    /// `true` if the table never held a slot, even before a [`reset`](Self::reset).
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of materialized slots.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// All materialized slots, indexed by key id.
    pub fn values(&self) -> &[T] {
        &self.table
    }

    /// Mutable view of all materialized slots. Does not grow the table.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.table
    }

    /// Exchange backing storage with `other` without copying elements.
    pub fn swap_data(&mut self, other: &mut Self) {
        log::trace!(
            "swapping {} sidetable storage ({} <-> {} slots)",
            K::KIND,
            self.table.len(),
            other.table.len()
        );
        mem::swap(&mut self.table, &mut other.table);
    }

    #[inline]
    fn ensure_slot(&mut self, key: K) -> usize {
        debug_assert!(key.valid(), "invalid {} index used for sidetable access", K::KIND);
        let i = key.id();
        if i >= self.table.len() {
            self.grow(i);
        }
        i
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self, out_of_bounds_index: usize) {
        let old_len = self.table.len();
        debug_assert!(out_of_bounds_index >= old_len);
        let requested = Self::next_size(out_of_bounds_index);
        self.table.reserve(requested - old_len);
        // Also hand out whatever extra capacity the reservation produced.
        // Zero-sized values report unbounded capacity, so stop at the request.
        let target = if mem::size_of::<T>() == 0 {
            requested
        } else {
            self.table.capacity()
        };
        self.table
            .extend(iter::repeat_with(T::default).take(target - old_len));
        log::trace!(
            "grew {} sidetable for index {}: {} -> {} slots",
            K::KIND,
            out_of_bounds_index,
            old_len,
            self.table.len()
        );
    }
}
