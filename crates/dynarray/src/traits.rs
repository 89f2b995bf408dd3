// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::ptr::NonNull;

use crate::error::{AllocError, ErrorKind};

/// Provider of raw element storage for a [`DynArray`](crate::DynArray).
///
/// The container never acquires memory itself; every buffer it owns comes from
/// and goes back to its allocator value. Allocators report failure through
/// `Err(AllocError)` and must never panic or abort on exhaustion.
///
/// Clones of an allocator value must be interchangeable: a buffer obtained
/// through one clone may be reallocated or released through another.
///
/// Capacities passed to `reallocate`/`deallocate` are always the capacity the
/// buffer was obtained with.
pub trait Allocator<T>: Clone {
    /// Returns storage for `capacity` elements. `capacity` is never zero.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the request cannot be satisfied.
    fn allocate(&self, capacity: usize) -> Result<NonNull<T>, AllocError>;

    /// Resizes `ptr` (or allocates when `ptr` is `None`) to hold `new_capacity`
    /// elements, preserving the first `min(old_capacity, new_capacity)` elements.
    ///
    /// `new_capacity` is never zero.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the request cannot be satisfied. The original
    /// buffer is left untouched and still owned by the caller.
    ///
    /// # Safety
    ///
    /// When `ptr` is `Some`, it must have been returned by this allocator (or a
    /// clone of it) for exactly `old_capacity` elements and not yet released.
    unsafe fn reallocate(
        &self,
        ptr: Option<NonNull<T>>,
        old_capacity: usize,
        new_capacity: usize,
    ) -> Result<NonNull<T>, AllocError>;

    /// Releases a buffer obtained from this allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator (or a clone of it) for
    /// exactly `capacity` elements and not yet released. Elements still stored
    /// in the buffer are not dropped.
    unsafe fn deallocate(&self, ptr: NonNull<T>, capacity: usize);
}

/// Passive sink notified of every failure a container reports.
///
/// The `Result` returned by each operation is the primary contract; a channel
/// only observes. The channel is fixed by the container's type and travels
/// with it through copies and moves.
pub trait ErrorChannel: Clone {
    /// Called synchronously, once per failing operation.
    fn notify(&self, kind: ErrorKind);

    /// Returns the channel for a container derived from this one
    /// (deep copies, filter and map results).
    ///
    /// Defaults to a clone. Channels that hold pending state return a
    /// fresh channel so a derived container does not inherit it.
    fn fork(&self) -> Self {
        self.clone()
    }
}
