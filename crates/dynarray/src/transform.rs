// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Filtering, mapping, range extraction and copy-out.

use crate::dyn_array::DynArray;
use crate::error::DynArrayError;
use crate::traits::{Allocator, ErrorChannel};

impl<T, A, C> DynArray<T, A, C>
where
    A: Allocator<T>,
    C: ErrorChannel,
{
    /// Returns a new array holding clones of every element satisfying
    /// `predicate`, in order.
    ///
    /// The result uses a clone of this array's allocator and a fork of its channel.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if the result cannot grow;
    /// the failure is reported on this array's channel.
    pub fn find_all<P>(&self, mut predicate: P) -> Result<Self, DynArrayError>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        let matches = self.as_slice().iter().filter(|&item| predicate(item)).cloned();

        Self::collect_quietly(matches, 0, self.allocator().clone(), self.channel().fork())
            .map_err(|e| self.fail(e))
    }

    /// Maps every element through `converter` into a new array of `U` drawing
    /// storage from `allocator`.
    ///
    /// The destination is pre-sized to this array's capacity and shares a fork
    /// of this array's channel.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if the destination cannot be
    /// allocated; the failure is reported on this array's channel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynarray::{DynArray, DynArrayError, GlobalAllocator};
    ///
    /// fn example() -> Result<(), DynArrayError> {
    ///     let mut ints: DynArray<i32> = DynArray::new();
    ///     ints.extend_from_slice(&[1, 2, 3])?;
    ///
    ///     let floats = ints.convert_all(|&x| x as f32, GlobalAllocator)?;
    ///
    ///     assert_eq!(floats.as_slice(), &[1.0, 2.0, 3.0]);
    ///     assert_eq!(floats.capacity(), ints.capacity());
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn convert_all<U, B, F>(&self, converter: F, allocator: B) -> Result<DynArray<U, B, C>, DynArrayError>
    where
        B: Allocator<U>,
        F: FnMut(&T) -> U,
    {
        let converted = self.as_slice().iter().map(converter);

        DynArray::<U, B, C>::collect_quietly(converted, self.capacity(), allocator, self.channel().fork())
            .map_err(|e| self.fail(e))
    }

    /// Returns a deep copy of `[start, start + length)` with capacity `length`.
    ///
    /// # Errors
    ///
    /// - [`DynArrayError::IndexOutOfRange`] if the range is not inside the array.
    /// - [`DynArrayError::AllocationFailure`] if the copy cannot be allocated.
    pub fn get_range(&self, start: usize, length: usize) -> Result<Self, DynArrayError>
    where
        T: Clone,
    {
        let range = self.checked_range(start, length)?;
        let items = self.as_slice()[range].iter().cloned();

        Self::collect_quietly(items, length, self.allocator().clone(), self.channel().fork())
            .map_err(|e| self.fail(e))
    }

    /// Applies `action` to every element in order, in place.
    pub fn for_each<F>(&mut self, action: F)
    where
        F: FnMut(&mut T),
    {
        self.as_mut_slice().iter_mut().for_each(action);
    }

    /// Writes clones of every element to `dst[offset..offset + len()]`.
    ///
    /// Values already at the destination are overwritten without being dropped.
    ///
    /// # Safety
    ///
    /// `dst.add(offset)` must be valid for writes of `len()` consecutive,
    /// properly aligned `T`s, and must not overlap this array's buffer.
    /// No bounds checking is performed; use [`copy_to_slice`](Self::copy_to_slice)
    /// when the destination size is not already proven.
    pub unsafe fn copy_to_unchecked(&self, dst: *mut T, offset: usize)
    where
        T: Clone,
    {
        for (i, item) in self.as_slice().iter().enumerate() {
            // SAFETY: the caller guarantees room for len() elements at dst + offset.
            unsafe { dst.add(offset + i).write(item.clone()) };
        }
    }

    /// Clones every element into `dst[offset..offset + len()]`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if `dst` is too short; nothing
    /// is written in that case.
    pub fn copy_to_slice(&self, dst: &mut [T], offset: usize) -> Result<(), DynArrayError>
    where
        T: Clone,
    {
        let end = match offset.checked_add(self.len()) {
            Some(end) if end <= dst.len() => end,
            _ => {
                return Err(self.fail(DynArrayError::out_of_range(
                    offset,
                    self.len(),
                    dst.len(),
                )));
            }
        };

        dst[offset..end].clone_from_slice(self.as_slice());
        Ok(())
    }
}
