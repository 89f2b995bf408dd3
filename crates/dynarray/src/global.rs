// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! GlobalAllocator - storage from the global heap.
//!
//! Reports exhaustion as `AllocError` instead of calling `handle_alloc_error`.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::traits::Allocator;

/// Default [`Allocator`] backed by `alloc::alloc`.
///
/// Zero-sized element types never touch the heap; a dangling, well-aligned
/// pointer stands in for their buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GlobalAllocator;

#[inline(always)]
fn layout_for<T>(capacity: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(capacity).map_err(|_| AllocError::new(capacity))
}

impl<T> Allocator<T> for GlobalAllocator {
    fn allocate(&self, capacity: usize) -> Result<NonNull<T>, AllocError> {
        let layout = layout_for::<T>(capacity)?;

        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: layout has a non-zero size.
        let ptr = unsafe { alloc::alloc::alloc(layout) };

        NonNull::new(ptr.cast::<T>()).ok_or(AllocError::new(capacity))
    }

    unsafe fn reallocate(
        &self,
        ptr: Option<NonNull<T>>,
        old_capacity: usize,
        new_capacity: usize,
    ) -> Result<NonNull<T>, AllocError> {
        let Some(ptr) = ptr else {
            return self.allocate(new_capacity);
        };

        let old_layout = layout_for::<T>(old_capacity)?;
        let new_layout = layout_for::<T>(new_capacity)?;

        if old_layout.size() == 0 || new_layout.size() == 0 {
            // Zero-sized elements: nothing was ever allocated.
            return Ok(NonNull::dangling());
        }

        // SAFETY (PRECONDITIONS ARE MET): the caller guarantees ptr was allocated
        // with old_layout; new size is non-zero and fits isize (checked by Layout::array).
        let new_ptr = unsafe { alloc::alloc::realloc(ptr.as_ptr().cast::<u8>(), old_layout, new_layout.size()) };

        NonNull::new(new_ptr.cast::<T>()).ok_or(AllocError::new(new_capacity))
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, capacity: usize) {
        let Ok(layout) = layout_for::<T>(capacity) else {
            return;
        };

        if layout.size() == 0 {
            return;
        }

        // SAFETY (PRECONDITIONS ARE MET): the caller guarantees ptr was allocated with this layout.
        unsafe { alloc::alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) };
    }
}
