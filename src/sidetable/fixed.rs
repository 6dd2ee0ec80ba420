//! Fixed-size sidetable.
//!
//! The table is sized once at construction and never reallocates, so a
//! phase can rely on the key universe being exactly `0..len()`. Elements
//! are default-initialized unless an initial value is given.

use crate::core::error::{SidetableError, SidetableResult};
use crate::ir::SidetableKey;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::{iter, mem};

/// A fixed-size sidetable mapping `K` to `T`.
///
/// Use [`FixedBlockSidetable`](super::FixedBlockSidetable) or
/// [`FixedOpIndexSidetable`](super::FixedOpIndexSidetable) to create one.
pub struct FixedSidetable<'arena, T, K: SidetableKey> {
    table: BumpVec<'arena, T>,
    _key: PhantomData<K>,
}

impl<'arena, T, K: SidetableKey> FixedSidetable<'arena, T, K> {
    pub(super) fn new_in(size: usize, arena: &'arena Bump) -> Self
    where
        T: Default,
    {
        Self {
            table: BumpVec::from_iter_in(iter::repeat_with(T::default).take(size), arena),
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

    #[inline]
    pub fn get(&self, key: K) -> &T {
        self.debug_check(key);
        &self.table[key.id()]
    }

    #[inline]
    pub fn get_mut(&mut self, key: K) -> &mut T {
        self.debug_check(key);
        &mut self.table[key.id()]
    }

    /// Bounds-checked read that reports misuse instead of asserting.
    pub fn checked_get(&self, key: K) -> SidetableResult<&T> {
        let i = self.checked_slot(key)?;
        Ok(&self.table[i])
    }

    /// Bounds-checked write access that reports misuse instead of asserting.
    pub fn checked_get_mut(&mut self, key: K) -> SidetableResult<&mut T> {
        let i = self.checked_slot(key)?;
        Ok(&mut self.table[i])
    }

    /// Overwrite every slot with `T::default()`.
    pub fn reset(&mut self)
    where
        T: Default,
    {
        log::trace!("resetting fixed {} sidetable of {} slots", K::KIND, self.table.len());
        self.table.fill_with(T::default);
    }

    /// Overwrite every slot with `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.table.fill(value);
    }

    /// Number of slots, fixed at construction.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// `true` for a table created with size zero.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// All slots, indexed by key id.
    pub fn values(&self) -> &[T] {
        &self.table
    }

    /// Mutable view of all slots.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.table
    }

    /// Exchange backing storage (and therefore sizes) with `other`.
    pub fn swap_data(&mut self, other: &mut Self) {
        log::trace!(
            "swapping fixed {} sidetable storage ({} <-> {} slots)",
            K::KIND,
            self.table.len(),
            other.table.len()
        );
        mem::swap(&mut self.table, &mut other.table);
    }

    #[inline]
    fn debug_check(&self, key: K) {
        debug_assert!(key.valid(), "invalid {} index used for sidetable access", K::KIND);
        debug_assert!(
            key.id() < self.table.len(),
            "{} index {} out of bounds for fixed sidetable of size {}",
            K::KIND,
            key.id(),
            self.table.len()
        );
    }

    fn checked_slot(&self, key: K) -> SidetableResult<usize> {
        if !key.valid() {
            return Err(SidetableError::InvalidKey { kind: K::KIND });
        }
        let index = key.id();
        if index >= self.table.len() {
            return Err(SidetableError::OutOfBounds {
                kind: K::KIND,
                index,
                len: self.table.len(),
            });
        }
        Ok(index)
    }
}

impl<T, K: SidetableKey> Index<K> for FixedSidetable<'_, T, K> {
    type Output = T;

    fn index(&self, key: K) -> &T {
        self.get(key)
    }
}

impl<T, K: SidetableKey> IndexMut<K> for FixedSidetable<'_, T, K> {
    fn index_mut(&mut self, key: K) -> &mut T {
        self.get_mut(key)
    }
}
