// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::rc::Rc;
use core::cell::Cell;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::global::GlobalAllocator;
use crate::traits::Allocator;

/// Configurable behaviour for [`MockAllocator`].
///
/// Requests are `allocate` and `reallocate` calls, counted together.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MockAllocatorBehaviour {
    /// Normal operation (delegates to [`GlobalAllocator`]).
    #[default]
    None,
    /// Every request fails.
    FailAlways,
    /// The Nth request fails (1-indexed: 1 = first request fails).
    FailAtNthRequest(usize),
    /// Every request for more than the given number of elements fails.
    FailAbove(usize),
}

#[derive(Debug, Default)]
struct MockState {
    behaviour: Cell<MockAllocatorBehaviour>,
    requests: Cell<usize>,
    failures: Cell<usize>,
    releases: Cell<usize>,
    live_buffers: Cell<usize>,
}

/// Mock allocator for testing.
///
/// Wraps [`GlobalAllocator`] but allows simulating failures via
/// [`MockAllocatorBehaviour`]. Clones share behaviour and counters, so an
/// array, its copies, and the arrays derived from it all report here.
#[derive(Debug, Default, Clone)]
pub struct MockAllocator {
    inner: GlobalAllocator,
    state: Rc<MockState>,
}

impl MockAllocator {
    /// Creates a new mock allocator with the specified behaviour.
    pub fn new(behaviour: MockAllocatorBehaviour) -> Self {
        let mock = Self::default();
        mock.change_behaviour(behaviour);
        mock
    }

    /// Changes the behaviour for this allocator and every clone of it.
    pub fn change_behaviour(&self, behaviour: MockAllocatorBehaviour) {
        self.state.behaviour.set(behaviour);
    }

    /// Resets the request counter.
    pub fn reset_count(&self) {
        self.state.requests.set(0);
    }

    /// Returns how many `allocate`/`reallocate` calls were made.
    pub fn request_count(&self) -> usize {
        self.state.requests.get()
    }

    /// Returns how many requests were refused.
    pub fn failure_count(&self) -> usize {
        self.state.failures.get()
    }

    /// Returns how many `deallocate` calls were made.
    pub fn release_count(&self) -> usize {
        self.state.releases.get()
    }

    /// Returns the number of buffers handed out and not yet released.
    pub fn live_buffers(&self) -> usize {
        self.state.live_buffers.get()
    }

    fn should_fail(&self, capacity: usize) -> bool {
        let current = self.state.requests.get() + 1;
        self.state.requests.set(current);

        let fail = match self.state.behaviour.get() {
            MockAllocatorBehaviour::None => false,
            MockAllocatorBehaviour::FailAlways => true,
            MockAllocatorBehaviour::FailAtNthRequest(n) => current == n,
            MockAllocatorBehaviour::FailAbove(limit) => capacity > limit,
        };

        if fail {
            self.state.failures.set(self.state.failures.get() + 1);
        }

        fail
    }
}

impl<T> Allocator<T> for MockAllocator {
    fn allocate(&self, capacity: usize) -> Result<NonNull<T>, AllocError> {
        if self.should_fail(capacity) {
            return Err(AllocError::new(capacity));
        }

        let ptr = Allocator::<T>::allocate(&self.inner, capacity)?;
        self.state.live_buffers.set(self.state.live_buffers.get() + 1);

        Ok(ptr)
    }

    unsafe fn reallocate(
        &self,
        ptr: Option<NonNull<T>>,
        old_capacity: usize,
        new_capacity: usize,
    ) -> Result<NonNull<T>, AllocError> {
        if self.should_fail(new_capacity) {
            return Err(AllocError::new(new_capacity));
        }

        // SAFETY: forwarded caller guarantees.
        let new_ptr = unsafe { self.inner.reallocate(ptr, old_capacity, new_capacity) }?;

        if ptr.is_none() {
            self.state.live_buffers.set(self.state.live_buffers.get() + 1);
        }

        Ok(new_ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, capacity: usize) {
        self.state.releases.set(self.state.releases.get() + 1);
        self.state
            .live_buffers
            .set(self.state.live_buffers.get().saturating_sub(1));

        // SAFETY: forwarded caller guarantees.
        unsafe { self.inner.deallocate(ptr, capacity) };
    }
}
