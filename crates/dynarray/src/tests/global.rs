// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{AllocError, Allocator, GlobalAllocator};

#[test]
fn test_allocate_reallocate_deallocate() {
    let allocator = GlobalAllocator;

    let ptr = Allocator::<u64>::allocate(&allocator, 4).expect("Failed to allocate(4)");

    // SAFETY: 4 slots were just allocated.
    unsafe {
        for i in 0..4 {
            ptr.as_ptr().add(i).write(i as u64);
        }
    }

    // SAFETY: ptr came from this allocator with capacity 4.
    let ptr = unsafe { allocator.reallocate(Some(ptr), 4, 16) }.expect("Failed to reallocate(..)");

    // SAFETY: realloc preserves the first 4 elements.
    unsafe {
        for i in 0..4 {
            assert_eq!(ptr.as_ptr().add(i).read(), i as u64);
        }
        allocator.deallocate(ptr, 16);
    }
}

#[test]
fn test_reallocate_from_none_allocates() {
    let allocator = GlobalAllocator;

    // SAFETY: no previous buffer.
    let ptr = unsafe { Allocator::<u32>::reallocate(&allocator, None, 0, 8) }
        .expect("Failed to reallocate(None, ..)");

    // SAFETY: ptr came from this allocator with capacity 8.
    unsafe { allocator.deallocate(ptr, 8) };
}

#[test]
fn test_zero_sized_type_is_dangling() {
    let allocator = GlobalAllocator;

    let ptr = Allocator::<()>::allocate(&allocator, 1000).expect("Failed to allocate(1000)");
    assert_eq!(ptr, core::ptr::NonNull::dangling());

    // SAFETY: zero-sized buffers are never touched.
    unsafe { allocator.deallocate(ptr, 1000) };
}

#[test]
fn test_layout_overflow_is_error() {
    let allocator = GlobalAllocator;

    let result = Allocator::<u64>::allocate(&allocator, usize::MAX);

    assert_eq!(result, Err(AllocError::new(usize::MAX)));
}
