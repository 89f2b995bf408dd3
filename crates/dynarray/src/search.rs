// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Linear and binary search.
//!
//! Ranged variants take `(start, length)` and fail with
//! [`DynArrayError::IndexOutOfRange`] when `start >= len()` or
//! `start + length > len()`, without invoking the predicate or comparator.
//! `_from(start)` variants scan `[start, len())` under the same rule.
//! Whole-array variants never fail.

use core::cmp::Ordering;

use crate::dyn_array::DynArray;
use crate::error::DynArrayError;
use crate::traits::{Allocator, ErrorChannel};

/// Half-open bisection; `cmp(element, value)` orders an element against the key.
fn bisect<T, F>(sorted: &[T], value: &T, mut cmp: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut lo = 0;
    let mut hi = sorted.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;

        match cmp(&sorted[mid], value) {
            Ordering::Equal => return true,
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }

    false
}

impl<T, A, C> DynArray<T, A, C>
where
    A: Allocator<T>,
    C: ErrorChannel,
{
    fn tail_length(&self, start: usize) -> usize {
        self.len().saturating_sub(start)
    }

    // =========================================================================
    // Equality search
    // =========================================================================

    /// Returns `true` if an element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().iter().any(|item| item == value)
    }

    /// Returns `true` if `cmp(element, value)` is `Equal` for some element.
    pub fn contains_by<F>(&self, value: &T, mut cmp: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_slice()
            .iter()
            .any(|item| cmp(item, value) == Ordering::Equal)
    }

    /// Returns the position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|item| item == value)
    }

    /// Returns the position of the first element equal to `value` at or after `start`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if `start >= len()`.
    pub fn index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>, DynArrayError>
    where
        T: PartialEq,
    {
        self.index_of_in(value, start, self.tail_length(start))
    }

    /// Returns the position of the first element equal to `value` in
    /// `[start, start + length)`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if the range is not inside the array.
    pub fn index_of_in(
        &self,
        value: &T,
        start: usize,
        length: usize,
    ) -> Result<Option<usize>, DynArrayError>
    where
        T: PartialEq,
    {
        self.find_index_in(start, length, |item| item == value)
    }

    /// Like [`index_of_in`](Self::index_of_in) with a three-way comparator.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if the range is not inside the array.
    pub fn index_of_in_by<F>(
        &self,
        value: &T,
        start: usize,
        length: usize,
        mut cmp: F,
    ) -> Result<Option<usize>, DynArrayError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.find_index_in(start, length, |item| cmp(item, value) == Ordering::Equal)
    }

    // =========================================================================
    // Predicate search
    // =========================================================================

    /// Returns `true` if any element satisfies `predicate`.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice().iter().any(predicate)
    }

    /// Returns the first element satisfying `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice().iter().find(|&item| predicate(item))
    }

    /// Returns the first element in `[start, start + length)` satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if the range is not inside the array.
    pub fn find_in<P>(
        &self,
        start: usize,
        length: usize,
        mut predicate: P,
    ) -> Result<Option<&T>, DynArrayError>
    where
        P: FnMut(&T) -> bool,
    {
        let range = self.checked_range(start, length)?;

        Ok(self.as_slice()[range].iter().find(|&item| predicate(item)))
    }

    /// Returns the last element satisfying `predicate`.
    pub fn find_last<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice().iter().rev().find(|&item| predicate(item))
    }

    /// Returns the last element in `[start, start + length)` satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if the range is not inside the array.
    pub fn find_last_in<P>(
        &self,
        start: usize,
        length: usize,
        mut predicate: P,
    ) -> Result<Option<&T>, DynArrayError>
    where
        P: FnMut(&T) -> bool,
    {
        let range = self.checked_range(start, length)?;

        Ok(self.as_slice()[range].iter().rev().find(|&item| predicate(item)))
    }

    /// Returns the position of the first element satisfying `predicate`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynarray::{DynArray, DynArrayError};
    ///
    /// fn example() -> Result<(), DynArrayError> {
    ///     let mut array: DynArray<i32> = DynArray::new();
    ///     array.extend_from_slice(&[1, 2, 3, 4, 5])?;
    ///
    ///     assert_eq!(array.find_index(|x| x % 2 == 0), Some(1));
    ///     assert_eq!(array.find_index_in(2, 3, |x| x % 2 == 1)?, Some(2));
    ///     assert!(array.find_index_in(2, 4, |x| x % 2 == 1).is_err());
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice().iter().position(predicate)
    }

    /// Returns the position of the first element at or after `start` satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if `start >= len()`.
    pub fn find_index_from<P>(&self, start: usize, predicate: P) -> Result<Option<usize>, DynArrayError>
    where
        P: FnMut(&T) -> bool,
    {
        self.find_index_in(start, self.tail_length(start), predicate)
    }

    /// Returns the position of the first element in `[start, start + length)`
    /// satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if the range is not inside the array.
    pub fn find_index_in<P>(
        &self,
        start: usize,
        length: usize,
        predicate: P,
    ) -> Result<Option<usize>, DynArrayError>
    where
        P: FnMut(&T) -> bool,
    {
        let range = self.checked_range(start, length)?;

        Ok(self.as_slice()[range]
            .iter()
            .position(predicate)
            .map(|offset| start + offset))
    }

    /// Returns the position of the last element satisfying `predicate`.
    pub fn find_last_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice().iter().rposition(predicate)
    }

    /// Returns the position of the last element at or after `start` satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if `start >= len()`.
    pub fn find_last_index_from<P>(
        &self,
        start: usize,
        predicate: P,
    ) -> Result<Option<usize>, DynArrayError>
    where
        P: FnMut(&T) -> bool,
    {
        self.find_last_index_in(start, self.tail_length(start), predicate)
    }

    /// Returns the position of the last element in `[start, start + length)`
    /// satisfying `predicate`. The range is scanned back to front.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if the range is not inside the array.
    pub fn find_last_index_in<P>(
        &self,
        start: usize,
        length: usize,
        predicate: P,
    ) -> Result<Option<usize>, DynArrayError>
    where
        P: FnMut(&T) -> bool,
    {
        let range = self.checked_range(start, length)?;

        Ok(self.as_slice()[range]
            .iter()
            .rposition(predicate)
            .map(|offset| start + offset))
    }

    // =========================================================================
    // Binary search
    // =========================================================================

    /// Returns `true` if `value` is present. The array must be sorted ascending.
    pub fn binary_search(&self, value: &T) -> bool
    where
        T: Ord,
    {
        bisect(self.as_slice(), value, T::cmp)
    }

    /// Returns `true` if an element compares `Equal` to `value`.
    ///
    /// `cmp(element, value)` must order elements against the key, and the array
    /// must be sorted ascending under it.
    pub fn binary_search_by<F>(&self, value: &T, cmp: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        bisect(self.as_slice(), value, cmp)
    }

    /// Binary search restricted to `[start, start + length)`, which must be sorted.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if the range is not inside the array.
    pub fn binary_search_in(&self, start: usize, length: usize, value: &T) -> Result<bool, DynArrayError>
    where
        T: Ord,
    {
        self.binary_search_in_by(start, length, value, T::cmp)
    }

    /// Binary search restricted to `[start, start + length)` with a three-way comparator.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if the range is not inside the array.
    pub fn binary_search_in_by<F>(
        &self,
        start: usize,
        length: usize,
        value: &T,
        cmp: F,
    ) -> Result<bool, DynArrayError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let range = self.checked_range(start, length)?;

        Ok(bisect(&self.as_slice()[range], value, cmp))
    }
}
