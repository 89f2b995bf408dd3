// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Dynamic array with fallible growth, pluggable allocators and explicit error channels.
//!
//! `DynArray<T, A, C>` is a contiguous growable array for code that cannot
//! unwind on allocation failure (embedded, kernel, `no_std`).
//!
//! # Core Guarantees
//!
//! - **Fallible everything**: every operation that can fail returns
//!   `Result<_, DynArrayError>`; allocation failure never panics or aborts.
//! - **No partial mutation**: a failed operation leaves the array as it was.
//! - **Injected storage**: buffers come from an [`Allocator`] type parameter,
//!   [`GlobalAllocator`] by default.
//! - **Error channel**: besides the `Result`, each failure is reported to an
//!   [`ErrorChannel`]: [`Silent`], [`PollingChannel`] or [`CallbackChannel`].
//! - **Fallible copies**: deep copies return `Result`; a failed copy never
//!   produces a half-built array.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use dynarray::{DynArray, DynArrayError};
//!
//! fn example() -> Result<(), DynArrayError> {
//!     let mut array: DynArray<i32> = DynArray::new();
//!     array.extend_from_slice(&[1, 2, 3])?;
//!
//!     assert_eq!(array.index_of(&1), Some(0));
//!     assert!(array.binary_search(&2));
//!
//!     array.clear();
//!     assert_eq!(array.len(), 0);
//!     assert_eq!(array.capacity(), 8);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Polling Channel
//!
//! ```rust
//! use dynarray::{DynArray, ErrorKind, GlobalAllocator, PollingChannel};
//!
//! let mut array = DynArray::<u8, GlobalAllocator, PollingChannel>::default();
//! array.push(1).unwrap();
//!
//! assert!(array.set_capacity(0).is_err());
//! assert_eq!(array.take_last_error(), ErrorKind::InvalidCapacity);
//! // Reading clears it.
//! assert_eq!(array.take_last_error(), ErrorKind::Ok);
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test_utils` feature to inject allocation failures:
//!
//! ```toml
//! [dev-dependencies]
//! dynarray = { version = "*", features = ["test_utils"] }
//! ```
//!
//! ```rust
//! // test_utils feature required in dev-dependencies
//! #[cfg(test)]
//! mod tests {
//!     use dynarray::DynArray;
//!     use dynarray::test_utils::{MockAllocator, MockAllocatorBehaviour};
//!
//!     #[test]
//!     fn test_handles_push_failure() {
//!         let mock = MockAllocator::new(MockAllocatorBehaviour::FailAlways);
//!         let mut array: DynArray<u8, MockAllocator> = DynArray::new_in(mock);
//!
//!         assert!(array.push(1).is_err());
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod channel;
mod dyn_array;
mod error;
mod global;
mod search;
mod support;
mod traits;
mod transform;

pub use channel::{CallbackChannel, ErrorCallback, PollingChannel, Silent};
pub use dyn_array::{DynArray, MIN_CAPACITY};
pub use error::{AllocError, DynArrayError, ErrorKind};
pub use global::GlobalAllocator;
pub use traits::{Allocator, ErrorChannel};

#[cfg(any(test, feature = "test_utils"))]
pub use support::test_utils;
