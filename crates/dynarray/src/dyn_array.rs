// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::marker::PhantomData;
use core::ops::{Deref, DerefMut, Range};
use core::ptr::{self, NonNull};

use crate::channel::{CallbackChannel, ErrorCallback, PollingChannel, Silent};
use crate::error::{DynArrayError, ErrorKind};
use crate::global::GlobalAllocator;
use crate::traits::{Allocator, ErrorChannel};

/// Capacity of the first buffer a growing array allocates.
pub const MIN_CAPACITY: usize = 8;

/// Logs `err` and notifies `channel`. Every reported failure goes through here.
#[inline]
pub(crate) fn report<C: ErrorChannel>(channel: &C, err: DynArrayError) -> DynArrayError {
    log::debug!("dynarray: {err}");
    channel.notify(err.kind());
    err
}

/// Contiguous growable array with fallible growth.
///
/// Storage comes from the allocator `A`; every failure is returned as a
/// [`DynArrayError`] and also reported to the channel `C`. Operations that fail
/// leave the array exactly as it was.
///
/// Growth starts at [`MIN_CAPACITY`] and doubles until the required size fits,
/// with a single reallocation per growth step.
///
/// # Example
///
/// ```rust
/// use dynarray::{DynArray, DynArrayError};
///
/// fn example() -> Result<(), DynArrayError> {
///     let mut array: DynArray<u32> = DynArray::new();
///     array.push(1)?;
///     array.push(2)?;
///
///     assert_eq!(array.len(), 2);
///     assert_eq!(array.capacity(), 8);
///     assert_eq!(*array.get(1)?, 2);
///     assert!(array.get(2).is_err());
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct DynArray<T, A = GlobalAllocator, C = Silent>
where
    A: Allocator<T>,
    C: ErrorChannel,
{
    buf: Option<NonNull<T>>,
    len: usize,
    capacity: usize,
    allocator: A,
    channel: C,
    _marker: PhantomData<T>,
}

// SAFETY: DynArray owns its buffer exclusively; sending it sends the elements.
unsafe impl<T, A, C> Send for DynArray<T, A, C>
where
    T: Send,
    A: Allocator<T> + Send,
    C: ErrorChannel + Send,
{
}

// SAFETY: shared access only hands out `&T`, `&A` and `&C`.
unsafe impl<T, A, C> Sync for DynArray<T, A, C>
where
    T: Sync,
    A: Allocator<T> + Sync,
    C: ErrorChannel + Sync,
{
}

impl<T> DynArray<T, GlobalAllocator, Silent> {
    /// Creates an empty array on the global heap with a silent channel.
    ///
    /// Does not allocate.
    pub fn new() -> Self {
        Self::new_with(GlobalAllocator, Silent)
    }
}

impl<T, A, C> DynArray<T, A, C>
where
    A: Allocator<T>,
    C: ErrorChannel,
{
    /// Creates an empty array using `allocator` and `channel`.
    ///
    /// Does not allocate.
    pub fn new_with(allocator: A, channel: C) -> Self {
        Self {
            buf: None,
            len: 0,
            capacity: 0,
            allocator,
            channel,
            _marker: PhantomData,
        }
    }

    /// Creates an empty array using `allocator` and a default channel.
    pub fn new_in(allocator: A) -> Self
    where
        C: Default,
    {
        Self::new_with(allocator, C::default())
    }

    /// Builds an array from an element-producing sequence, with storage for
    /// `capacity` elements reserved up front.
    ///
    /// If the sequence yields more than `capacity` items, the array keeps
    /// growing with the usual policy.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if storage cannot be
    /// obtained. The failure is reported to `channel` before it is dropped.
    pub fn try_collect_in<I>(
        iter: I,
        capacity: usize,
        allocator: A,
        channel: C,
    ) -> Result<Self, DynArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        let notifier = channel.clone();
        Self::collect_quietly(iter, capacity, allocator, channel).map_err(|e| report(&notifier, e))
    }

    /// Builds an array holding clones of `items`, with capacity `items.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if storage cannot be obtained.
    pub fn from_slice_in(items: &[T], allocator: A, channel: C) -> Result<Self, DynArrayError>
    where
        T: Clone,
    {
        Self::try_collect_in(items.iter().cloned(), items.len(), allocator, channel)
    }

    pub(crate) fn collect_quietly<I>(
        iter: I,
        capacity: usize,
        allocator: A,
        channel: C,
    ) -> Result<Self, DynArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut array = Self::new_with(allocator, channel);
        array.realloc_exact(capacity)?;

        for item in iter {
            array.push_quietly(item)?;
        }

        Ok(array)
    }

    /// Returns the number of elements in the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the array can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the allocator this array draws storage from.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Returns the error channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Returns the error channel mutably, e.g. to re-register a callback.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Returns a raw pointer to the buffer, or null when nothing is allocated.
    pub fn as_ptr(&self) -> *const T {
        self.buf.map_or(ptr::null(), |p| p.as_ptr().cast_const())
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self.buf {
            // SAFETY: the first `len` elements are initialised.
            Some(p) => unsafe { core::slice::from_raw_parts(p.as_ptr(), self.len) },
            None => &[],
        }
    }

    /// Returns the elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.buf {
            // SAFETY: the first `len` elements are initialised and exclusively borrowed.
            Some(p) => unsafe { core::slice::from_raw_parts_mut(p.as_ptr(), self.len) },
            None => &mut [],
        }
    }

    #[inline(always)]
    fn data_ptr(&self) -> *mut T {
        self.buf.map_or(NonNull::dangling().as_ptr(), NonNull::as_ptr)
    }

    #[inline]
    pub(crate) fn fail(&self, err: DynArrayError) -> DynArrayError {
        report(&self.channel, err)
    }

    /// Validates `[start, start + length)` against `[0, len)`.
    ///
    /// Empty ranges are rejected as well when `start >= len`.
    pub(crate) fn checked_range(
        &self,
        start: usize,
        length: usize,
    ) -> Result<Range<usize>, DynArrayError> {
        match start.checked_add(length) {
            Some(end) if start < self.len && end <= self.len => Ok(start..end),
            _ => Err(self.fail(DynArrayError::out_of_range(start, length, self.len))),
        }
    }

    // =========================================================================
    // Capacity
    // =========================================================================

    fn grown_capacity(&self, required: usize) -> Option<usize> {
        let mut capacity = if self.capacity == 0 {
            MIN_CAPACITY
        } else {
            self.capacity.checked_mul(2)?
        };

        while capacity < required {
            capacity = capacity.checked_mul(2)?;
        }

        Some(capacity)
    }

    /// Reallocates to exactly `capacity`. Nothing changes on failure.
    fn realloc_exact(&mut self, capacity: usize) -> Result<(), DynArrayError> {
        debug_assert!(capacity >= self.len);

        if capacity == self.capacity {
            return Ok(());
        }

        if capacity == 0 {
            if let Some(p) = self.buf.take() {
                // SAFETY (PRECONDITIONS ARE MET): p was obtained from this allocator for self.capacity elements.
                unsafe { self.allocator.deallocate(p, self.capacity) };
            }
            self.capacity = 0;
            return Ok(());
        }

        // SAFETY (PRECONDITIONS ARE MET): buf, when present, was obtained from this allocator
        // for self.capacity elements.
        let p = unsafe { self.allocator.reallocate(self.buf, self.capacity, capacity) }?;

        self.buf = Some(p);
        self.capacity = capacity;

        Ok(())
    }

    #[cold]
    #[inline(never)]
    fn grow_to(&mut self, required: usize) -> Result<(), DynArrayError> {
        let capacity = self
            .grown_capacity(required)
            .ok_or(DynArrayError::AllocationFailure {
                requested: required,
            })?;

        self.realloc_exact(capacity)
    }

    #[inline(always)]
    fn maybe_grow_to(&mut self, required: usize) -> Result<(), DynArrayError> {
        if self.capacity >= required {
            return Ok(());
        }

        self.grow_to(required)
    }

    fn required_for(&self, additional: usize) -> Result<usize, DynArrayError> {
        self.len
            .checked_add(additional)
            .ok_or(DynArrayError::AllocationFailure {
                requested: usize::MAX,
            })
    }

    /// Ensures room for at least `additional` more elements, growing with the
    /// doubling policy when needed.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if the allocator fails or the
    /// required size overflows. The array is unchanged.
    pub fn reserve(&mut self, additional: usize) -> Result<(), DynArrayError> {
        let required = self.required_for(additional).map_err(|e| self.fail(e))?;
        self.maybe_grow_to(required).map_err(|e| self.fail(e))
    }

    /// Sets the capacity to exactly `capacity`.
    ///
    /// Can pre-size or shrink to fit. A capacity of zero releases the buffer.
    ///
    /// # Errors
    ///
    /// - [`DynArrayError::InvalidCapacity`] if `capacity < len()`.
    /// - [`DynArrayError::AllocationFailure`] if the allocator fails.
    ///
    /// In both cases the buffer is untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynarray::{DynArray, DynArrayError};
    ///
    /// fn example() -> Result<(), DynArrayError> {
    ///     let mut array: DynArray<u8> = DynArray::new();
    ///     array.extend_from_slice(&[1, 2, 3])?;
    ///
    ///     assert!(array.set_capacity(2).is_err());
    ///     array.set_capacity(3)?;
    ///     assert_eq!(array.capacity(), 3);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), DynArrayError> {
        if capacity < self.len {
            return Err(self.fail(DynArrayError::InvalidCapacity {
                requested: capacity,
                len: self.len,
            }));
        }

        self.realloc_exact(capacity).map_err(|e| self.fail(e))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    #[inline(always)]
    fn push_within_capacity(&mut self, value: T) {
        debug_assert!(self.len < self.capacity);

        // SAFETY (PRECONDITIONS ARE MET): len < capacity, so the slot is inside the buffer
        // and uninitialised.
        unsafe { self.data_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    pub(crate) fn push_quietly(&mut self, value: T) -> Result<(), DynArrayError> {
        if self.len == self.capacity {
            let required = self.required_for(1)?;
            self.grow_to(required)?;
        }

        self.push_within_capacity(value);
        Ok(())
    }

    /// Appends `value` to the end of the array.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if the array is full and
    /// cannot grow. `value` is dropped and the array is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), DynArrayError> {
        self.push_quietly(value).map_err(|e| self.fail(e))
    }

    /// Appends clones of every element of `items`, growing at most once.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if the array cannot grow to
    /// `len() + items.len()`. Nothing is appended in that case.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), DynArrayError>
    where
        T: Clone,
    {
        let required = self.required_for(items.len()).map_err(|e| self.fail(e))?;
        self.maybe_grow_to(required).map_err(|e| self.fail(e))?;

        for item in items {
            self.push_within_capacity(item.clone());
        }

        Ok(())
    }

    /// Appends every item of `iter`, reserving its lower size hint first.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] on the first failed growth.
    /// Items appended before the failure are kept.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), DynArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();

        self.reserve(lower)?;

        for item in iter {
            self.push(item)?;
        }

        Ok(())
    }

    /// Drops every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        let elems: *mut [T] = self.as_mut_slice();

        // Length first, so a panicking Drop cannot cause a double drop.
        self.len = 0;

        // SAFETY (PRECONDITIONS ARE MET): elems covers exactly the initialised elements,
        // which are no longer reachable through self.
        unsafe { ptr::drop_in_place(elems) };
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, DynArrayError> {
        if index >= self.len {
            return Err(self.fail(DynArrayError::out_of_range(index, 1, self.len)));
        }

        // SAFETY: index < len.
        Ok(unsafe { &*self.data_ptr().add(index) })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfRange`] if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, DynArrayError> {
        if index >= self.len {
            return Err(self.fail(DynArrayError::out_of_range(index, 1, self.len)));
        }

        // SAFETY: index < len.
        Ok(unsafe { &mut *self.data_ptr().add(index) })
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);

        // SAFETY: the caller guarantees index < len.
        unsafe { &*self.data_ptr().add(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);

        // SAFETY: the caller guarantees index < len.
        unsafe { &mut *self.data_ptr().add(index) }
    }

    // =========================================================================
    // Copy / move
    // =========================================================================

    fn deep_copy(&self) -> Result<Self, DynArrayError>
    where
        T: Clone,
    {
        let mut copy = Self::new_with(self.allocator.clone(), self.channel.fork());
        copy.realloc_exact(self.capacity)?;

        for item in self.as_slice() {
            copy.push_within_capacity(item.clone());
        }

        Ok(copy)
    }

    /// Deep copy: a new buffer of the same capacity, holding clones of every element.
    ///
    /// The copy uses a clone of the allocator and a fork of the channel.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if the new buffer cannot be
    /// obtained; the failure is reported on this array's channel and no copy exists.
    pub fn try_clone(&self) -> Result<Self, DynArrayError>
    where
        T: Clone,
    {
        self.deep_copy().map_err(|e| self.fail(e))
    }

    /// Replaces the contents of `self` with a deep copy of `source`, including
    /// its allocator and channel configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if the copy cannot be made;
    /// `self` is left exactly as it was and the failure is reported on its channel.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), DynArrayError>
    where
        T: Clone,
    {
        let copy = source.deep_copy().map_err(|e| self.fail(e))?;
        *self = copy;
        Ok(())
    }

    /// Moves the buffer, length, capacity, allocator and channel out, leaving
    /// `self` empty with no buffer.
    ///
    /// Never allocates and never fails. `self` keeps a clone of its allocator
    /// and a fork of its channel, so it can be reused.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynarray::{DynArray, DynArrayError};
    ///
    /// fn example() -> Result<(), DynArrayError> {
    ///     let mut source: DynArray<u8> = DynArray::new();
    ///     source.push(7)?;
    ///
    ///     let moved = source.take();
    ///
    ///     assert_eq!(moved.as_slice(), &[7]);
    ///     assert_eq!(source.len(), 0);
    ///     assert_eq!(source.capacity(), 0);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn take(&mut self) -> Self {
        let empty = Self::new_with(self.allocator.clone(), self.channel.fork());
        core::mem::replace(self, empty)
    }

    /// Move assignment: drops the current contents of `self` and takes over
    /// everything `source` owns, leaving `source` empty.
    pub fn move_from(&mut self, source: &mut Self) {
        *self = source.take();
    }
}

impl<T, A, X> DynArray<T, A, CallbackChannel<X>>
where
    A: Allocator<T>,
    X: Clone,
{
    /// Registers (or replaces) the function called on every failure.
    pub fn set_error_callback(&mut self, callback: ErrorCallback<X>, context: X) {
        self.channel.register(callback, context);
    }
}

impl<T, A> DynArray<T, A, PollingChannel>
where
    A: Allocator<T>,
{
    /// Returns the last failure kind since the previous call and resets it to `Ok`.
    pub fn take_last_error(&self) -> ErrorKind {
        self.channel.take_last_error()
    }
}

impl<T, A, C> Drop for DynArray<T, A, C>
where
    A: Allocator<T>,
    C: ErrorChannel,
{
    fn drop(&mut self) {
        self.clear();

        if let Some(p) = self.buf.take() {
            // SAFETY (PRECONDITIONS ARE MET): p was obtained from this allocator for self.capacity
            // elements; all elements were dropped by clear().
            unsafe { self.allocator.deallocate(p, self.capacity) };
        }

        self.capacity = 0;
    }
}

impl<T, A, C> Default for DynArray<T, A, C>
where
    A: Allocator<T> + Default,
    C: ErrorChannel + Default,
{
    fn default() -> Self {
        Self::new_with(A::default(), C::default())
    }
}

impl<T, A, C> Deref for DynArray<T, A, C>
where
    A: Allocator<T>,
    C: ErrorChannel,
{
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A, C> DerefMut for DynArray<T, A, C>
where
    A: Allocator<T>,
    C: ErrorChannel,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A, C> AsRef<[T]> for DynArray<T, A, C>
where
    A: Allocator<T>,
    C: ErrorChannel,
{
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A, C> core::fmt::Debug for DynArray<T, A, C>
where
    T: core::fmt::Debug,
    A: Allocator<T>,
    C: ErrorChannel,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynArray")
            .field("data", &self.as_slice())
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<T, A, C> PartialEq for DynArray<T, A, C>
where
    T: PartialEq,
    A: Allocator<T>,
    C: ErrorChannel,
{
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, A, C> Eq for DynArray<T, A, C>
where
    T: Eq,
    A: Allocator<T>,
    C: ErrorChannel,
{
}

impl<T, A, C> PartialEq<[T]> for DynArray<T, A, C>
where
    T: PartialEq,
    A: Allocator<T>,
    C: ErrorChannel,
{
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T, A, C, const N: usize> PartialEq<[T; N]> for DynArray<T, A, C>
where
    T: PartialEq,
    A: Allocator<T>,
    C: ErrorChannel,
{
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a, T, A, C> IntoIterator for &'a DynArray<T, A, C>
where
    A: Allocator<T>,
    C: ErrorChannel,
{
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A, C> IntoIterator for &'a mut DynArray<T, A, C>
where
    A: Allocator<T>,
    C: ErrorChannel,
{
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
