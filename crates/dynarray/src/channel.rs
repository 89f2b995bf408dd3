// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error channels: where failure kinds go besides the returned `Result`.

use core::cell::Cell;

use crate::error::ErrorKind;
use crate::traits::ErrorChannel;

/// Channel that discards every notification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Silent;

impl ErrorChannel for Silent {
    #[inline(always)]
    fn notify(&self, _kind: ErrorKind) {}
}

/// Sticky "last error" field, cleared by reading it.
///
/// Each failure overwrites the field. [`take_last_error`](Self::take_last_error)
/// returns the stored kind and resets it to [`ErrorKind::Ok`], so a poller
/// observes every error at most once.
///
/// A forked channel (deep copies, filter and map results) starts at `Ok`;
/// moving a container carries the pending value along.
#[derive(Debug, Default, Clone)]
pub struct PollingChannel {
    last: Cell<ErrorKind>,
}

impl PollingChannel {
    /// Creates a channel with no pending error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pending error kind and resets it to `Ok`.
    pub fn take_last_error(&self) -> ErrorKind {
        self.last.replace(ErrorKind::Ok)
    }

    /// Returns the pending error kind without clearing it.
    pub fn peek_last_error(&self) -> ErrorKind {
        self.last.get()
    }
}

impl ErrorChannel for PollingChannel {
    fn notify(&self, kind: ErrorKind) {
        self.last.set(kind);
    }

    fn fork(&self) -> Self {
        Self::new()
    }
}

/// Signature of a callback registered on a [`CallbackChannel`].
pub type ErrorCallback<X> = fn(ErrorKind, &X);

/// Channel that invokes a registered function with the failure kind and a
/// caller-owned context value.
///
/// Without a registration, notifications are discarded. The context is cloned
/// together with the container, so a shared handle (`Rc<Cell<_>>` and the like)
/// lets copies report to the same place.
#[derive(Clone)]
pub struct CallbackChannel<X: Clone> {
    callback: Option<ErrorCallback<X>>,
    context: X,
}

impl<X: Clone> CallbackChannel<X> {
    /// Creates a channel that forwards to `callback` with `context`.
    pub fn new(callback: ErrorCallback<X>, context: X) -> Self {
        Self {
            callback: Some(callback),
            context,
        }
    }

    /// Creates a channel with a context but no callback yet.
    pub fn unregistered(context: X) -> Self {
        Self {
            callback: None,
            context,
        }
    }

    /// Registers (or replaces) the callback and its context.
    pub fn register(&mut self, callback: ErrorCallback<X>, context: X) {
        self.callback = Some(callback);
        self.context = context;
    }

    /// Removes the callback. Subsequent failures are discarded.
    pub fn unregister(&mut self) {
        self.callback = None;
    }

    /// Returns `true` if a callback is registered.
    pub fn is_registered(&self) -> bool {
        self.callback.is_some()
    }

    /// Returns the context value handed to the callback.
    pub fn context(&self) -> &X {
        &self.context
    }
}

impl<X: Clone + Default> Default for CallbackChannel<X> {
    fn default() -> Self {
        Self::unregistered(X::default())
    }
}

impl<X: Clone> core::fmt::Debug for CallbackChannel<X> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CallbackChannel")
            .field("registered", &self.is_registered())
            .finish_non_exhaustive()
    }
}

impl<X: Clone> ErrorChannel for CallbackChannel<X> {
    fn notify(&self, kind: ErrorKind) {
        if let Some(callback) = self.callback {
            callback(kind, &self.context);
        }
    }
}
