// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for dynarray.

use thiserror::Error;

/// Failure kinds reported through an [`ErrorChannel`](crate::ErrorChannel).
///
/// `Ok` is the reset state of a polling channel; every other variant matches
/// exactly one [`DynArrayError`] variant.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// No error.
    #[default]
    Ok = 0,
    /// The allocator could not satisfy a size request.
    AllocationFailure = 1,
    /// An index or sub-range fell outside `[0, len)`.
    IndexOutOfRange = 2,
    /// An explicit capacity request was smaller than the element count.
    InvalidCapacity = 3,
}

impl ErrorKind {
    /// Returns `true` for [`ErrorKind::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Error returned by an [`Allocator`](crate::Allocator) that cannot provide storage.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("allocator could not provide room for {requested} elements")]
pub struct AllocError {
    /// Number of elements requested.
    pub requested: usize,
}

impl AllocError {
    /// Creates an `AllocError` for a request of `requested` elements.
    pub fn new(requested: usize) -> Self {
        Self { requested }
    }
}

/// Errors that can occur when working with a [`DynArray`](crate::DynArray).
///
/// Every failing operation leaves the container exactly as it was before the call.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum DynArrayError {
    /// The allocator could not provide room for `requested` elements,
    /// or the requested capacity overflowed `usize`.
    #[error("allocation failure: could not obtain room for {requested} elements")]
    AllocationFailure {
        /// Capacity that was requested.
        requested: usize,
    },

    /// The range `[start, start + length)` is not inside `[0, len)`.
    ///
    /// Also returned when `start + length` overflows `usize`.
    #[error("index out of range: [{start}, {start} + {length}) is outside [0, {len})")]
    IndexOutOfRange {
        /// First index of the requested range.
        start: usize,
        /// Number of elements in the requested range.
        length: usize,
        /// Length of the sequence being indexed.
        len: usize,
    },

    /// Requested capacity is smaller than the current length.
    #[error("invalid capacity: {requested} is less than the element count {len}")]
    InvalidCapacity {
        /// Capacity that was requested.
        requested: usize,
        /// Length of the container at the time of the call.
        len: usize,
    },
}

impl DynArrayError {
    /// Maps this error onto the [`ErrorKind`] taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AllocationFailure { .. } => ErrorKind::AllocationFailure,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::InvalidCapacity { .. } => ErrorKind::InvalidCapacity,
        }
    }

    pub(crate) fn out_of_range(start: usize, length: usize, len: usize) -> Self {
        Self::IndexOutOfRange { start, length, len }
    }
}

impl From<AllocError> for DynArrayError {
    fn from(err: AllocError) -> Self {
        Self::AllocationFailure {
            requested: err.requested,
        }
    }
}
