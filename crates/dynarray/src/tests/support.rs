// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::Cell;
use std::rc::Rc;

use crate::ErrorKind;

/// Element that counts how many times values of it were dropped.
#[derive(Debug, Clone)]
pub(crate) struct DropCounter {
    pub(crate) value: u32,
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    pub(crate) fn new(value: u32, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            value,
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

/// Context for `CallbackChannel` tests: the last reported kind and a call count.
pub(crate) type Recorder = Rc<(Cell<ErrorKind>, Cell<usize>)>;

pub(crate) fn recorder() -> Recorder {
    Rc::new((Cell::new(ErrorKind::Ok), Cell::new(0)))
}

pub(crate) fn record(kind: ErrorKind, recorder: &Recorder) {
    recorder.0.set(kind);
    recorder.1.set(recorder.1.get() + 1);
}

pub(crate) fn is_odd(x: &i32) -> bool {
    x % 2 != 0
}
