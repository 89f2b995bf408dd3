// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::Cell;
use std::rc::Rc;

use crate::test_utils::{MockAllocator, MockAllocatorBehaviour};
use crate::tests::support::DropCounter;
use crate::{DynArray, DynArrayError, ErrorKind, PollingChannel};

// =============================================================================
// try_clone()
// =============================================================================

#[test]
fn test_try_clone_is_independent() {
    let mut source: DynArray<i32> = DynArray::new();
    source.extend_from_slice(&[1, 2, 3]).expect("Failed to extend_from_slice(..)");

    let mut copy = source.try_clone().expect("Failed to try_clone()");

    assert_eq!(copy, source);
    assert_eq!(copy.capacity(), source.capacity());
    assert_ne!(copy.as_ptr(), source.as_ptr());

    copy[0] = 100;
    copy.push(4).expect("Failed to push(4)");

    assert_eq!(source.as_slice(), &[1, 2, 3]);
    assert_eq!(copy.as_slice(), &[100, 2, 3, 4]);
}

#[test]
fn test_try_clone_preserves_explicit_capacity() {
    let mut source: DynArray<i32> = DynArray::new();
    source.set_capacity(5).expect("Failed to set_capacity(5)");
    source.push(1).expect("Failed to push(1)");

    let copy = source.try_clone().expect("Failed to try_clone()");

    assert_eq!(copy.capacity(), 5);
}

#[test]
fn test_try_clone_of_empty_does_not_allocate() {
    let mock = MockAllocator::default();
    let source: DynArray<i32, MockAllocator> = DynArray::new_in(mock.clone());

    let copy = source.try_clone().expect("Failed to try_clone()");

    assert!(copy.is_empty());
    assert_eq!(copy.capacity(), 0);
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_try_clone_failure_produces_no_copy() {
    let mock = MockAllocator::default();
    let mut source: DynArray<i32, MockAllocator, PollingChannel> = DynArray::new_in(mock.clone());
    source.extend_from_slice(&[1, 2, 3]).expect("Failed to extend_from_slice(..)");

    mock.change_behaviour(MockAllocatorBehaviour::FailAlways);

    let result = source.try_clone();

    assert!(matches!(
        result,
        Err(DynArrayError::AllocationFailure { requested: 8 })
    ));
    assert_eq!(source.take_last_error(), ErrorKind::AllocationFailure);
    assert_eq!(source.as_slice(), &[1, 2, 3]);
    assert_eq!(mock.live_buffers(), 1);
}

#[test]
fn test_try_clone_clones_each_element_once() {
    let drops = Rc::new(Cell::new(0));
    let mut source: DynArray<DropCounter> = DynArray::new();
    source.push(DropCounter::new(1, &drops)).expect("Failed to push(..)");
    source.push(DropCounter::new(2, &drops)).expect("Failed to push(..)");

    let copy = source.try_clone().expect("Failed to try_clone()");
    assert_eq!(copy[1].value, 2);

    drop(copy);
    assert_eq!(drops.get(), 2);

    drop(source);
    assert_eq!(drops.get(), 4);
}

// =============================================================================
// try_clone_from()
// =============================================================================

#[test]
fn test_try_clone_from_replaces_contents() {
    let mut source: DynArray<i32> = DynArray::new();
    source.extend_from_slice(&[7, 8]).expect("Failed to extend_from_slice(..)");

    let mut target: DynArray<i32> = DynArray::new();
    target.extend_from_slice(&[1; 20]).expect("Failed to extend_from_slice(..)");

    target.try_clone_from(&source).expect("Failed to try_clone_from(..)");

    assert_eq!(target.as_slice(), &[7, 8]);
    assert_eq!(target.capacity(), source.capacity());
    assert_eq!(source.as_slice(), &[7, 8]);
}

#[test]
fn test_try_clone_from_drops_previous_elements() {
    let drops = Rc::new(Cell::new(0));
    let source: DynArray<DropCounter> = DynArray::new();

    let mut target: DynArray<DropCounter> = DynArray::new();
    for i in 0..3 {
        target.push(DropCounter::new(i, &drops)).expect("Failed to push(..)");
    }

    target.try_clone_from(&source).expect("Failed to try_clone_from(..)");

    assert_eq!(drops.get(), 3);
    assert!(target.is_empty());
}

#[test]
fn test_try_clone_from_failure_leaves_target_intact() {
    let mock = MockAllocator::default();
    let mut source: DynArray<i32, MockAllocator, PollingChannel> = DynArray::new_in(mock.clone());
    source.extend_from_slice(&[7, 8]).expect("Failed to extend_from_slice(..)");

    let mut target: DynArray<i32, MockAllocator, PollingChannel> = DynArray::new_in(mock.clone());
    target.extend_from_slice(&[1, 2, 3]).expect("Failed to extend_from_slice(..)");

    mock.change_behaviour(MockAllocatorBehaviour::FailAlways);

    let result = target.try_clone_from(&source);

    assert!(matches!(result, Err(DynArrayError::AllocationFailure { .. })));
    assert_eq!(target.as_slice(), &[1, 2, 3]);
    assert_eq!(target.take_last_error(), ErrorKind::AllocationFailure);
    assert_eq!(source.take_last_error(), ErrorKind::Ok);
}

// =============================================================================
// take(), move_from()
// =============================================================================

#[test]
fn test_take_transfers_buffer() {
    let mock = MockAllocator::default();
    let mut source: DynArray<i32, MockAllocator> = DynArray::new_in(mock.clone());
    source.extend_from_slice(&[1, 2, 3]).expect("Failed to extend_from_slice(..)");
    let ptr = source.as_ptr();
    mock.reset_count();

    let moved = source.take();

    assert_eq!(moved.as_ptr(), ptr);
    assert_eq!(moved.as_slice(), &[1, 2, 3]);
    assert_eq!(moved.capacity(), 8);

    assert!(source.is_empty());
    assert_eq!(source.capacity(), 0);
    assert!(source.as_ptr().is_null());

    assert_eq!(mock.request_count(), 0);
    assert_eq!(mock.live_buffers(), 1);
}

#[test]
fn test_take_source_is_reusable() {
    let mut source: DynArray<i32> = DynArray::new();
    source.push(1).expect("Failed to push(1)");

    let _moved = source.take();
    source.push(2).expect("Failed to push(2)");

    assert_eq!(source.as_slice(), &[2]);
    assert_eq!(source.capacity(), 8);
}

#[test]
fn test_move_from_releases_previous_buffer() {
    let mock = MockAllocator::default();

    let mut source: DynArray<i32, MockAllocator> = DynArray::new_in(mock.clone());
    source.extend_from_slice(&[1, 2]).expect("Failed to extend_from_slice(..)");

    let mut target: DynArray<i32, MockAllocator> = DynArray::new_in(mock.clone());
    target.extend_from_slice(&[9; 10]).expect("Failed to extend_from_slice(..)");
    assert_eq!(mock.live_buffers(), 2);

    target.move_from(&mut source);

    assert_eq!(target.as_slice(), &[1, 2]);
    assert_eq!(target.capacity(), 8);
    assert!(source.is_empty());
    assert_eq!(source.capacity(), 0);
    assert_eq!(mock.live_buffers(), 1);
}

#[test]
fn test_move_from_drops_previous_elements_once() {
    let drops = Rc::new(Cell::new(0));

    let mut source: DynArray<DropCounter> = DynArray::new();
    source.push(DropCounter::new(1, &drops)).expect("Failed to push(..)");

    let mut target: DynArray<DropCounter> = DynArray::new();
    target.push(DropCounter::new(2, &drops)).expect("Failed to push(..)");

    target.move_from(&mut source);
    assert_eq!(drops.get(), 1);
    assert_eq!(target[0].value, 1);

    drop(source);
    assert_eq!(drops.get(), 1);

    drop(target);
    assert_eq!(drops.get(), 2);
}
