// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use crate::{CoreError, ResourceLockRegistry};
use std::sync::Arc;
use std::time::Duration;
use tour_book_domain::ResourceId;

fn ids(values: &[i64]) -> Vec<ResourceId> {
    values.iter().map(|v| ResourceId::new(*v)).collect()
}

#[test]
fn test_acquire_and_release_on_drop() {
    let registry = ResourceLockRegistry::new();
    {
        let guard = registry
            .acquire(&ids(&[1, 2]), Duration::from_millis(100))
            .unwrap();
        assert_eq!(guard.resource_ids().len(), 2);
        assert!(registry.is_locked(ResourceId::new(1)));
        assert!(registry.is_locked(ResourceId::new(2)));
    }
    assert!(!registry.is_locked(ResourceId::new(1)));
    assert!(!registry.is_locked(ResourceId::new(2)));
}

#[test]
fn test_acquisition_order_is_ascending_regardless_of_input() {
    let registry = ResourceLockRegistry::new();
    let guard = registry
        .acquire(&ids(&[7, 3, 5, 3]), Duration::from_millis(100))
        .unwrap();
    assert_eq!(guard.resource_ids(), ids(&[3, 5, 7]).as_slice());
}

#[test]
fn test_contended_acquire_times_out_and_releases_partial_claims() {
    let registry = ResourceLockRegistry::new();
    let _holder = registry
        .acquire(&ids(&[5]), Duration::from_millis(100))
        .unwrap();

    // Wants 3 (free) then 5 (held): must time out and give 3 back
    let result = registry.acquire(&ids(&[3, 5]), Duration::from_millis(50));
    assert!(matches!(result, Err(CoreError::LockTimeout { .. })));
    assert!(!registry.is_locked(ResourceId::new(3)));
    assert!(registry.is_locked(ResourceId::new(5)));
}

#[test]
fn test_disjoint_pools_do_not_contend() {
    let registry = Arc::new(ResourceLockRegistry::new());
    let other = Arc::clone(&registry);

    let first = registry
        .acquire(&ids(&[1, 2]), Duration::from_millis(100))
        .unwrap();
    let handle = std::thread::spawn(move || {
        other
            .acquire(&ids(&[3, 4]), Duration::from_millis(100))
            .is_ok()
    });
    assert!(handle.join().unwrap());
    drop(first);
}

#[test]
fn test_waiter_proceeds_once_holder_releases() {
    let registry = Arc::new(ResourceLockRegistry::new());
    let holder = registry
        .acquire(&ids(&[9]), Duration::from_secs(1))
        .unwrap();

    let waiter_registry = Arc::clone(&registry);
    let handle = std::thread::spawn(move || {
        waiter_registry
            .acquire(&ids(&[9]), Duration::from_secs(5))
            .is_ok()
    });

    std::thread::sleep(Duration::from_millis(50));
    drop(holder);
    assert!(handle.join().unwrap());
}

#[test]
fn test_overlapping_pools_never_deadlock() {
    // Many concurrent attempts over overlapping sets, repeatedly; ordered
    // acquisition must let all of them finish
    let registry = Arc::new(ResourceLockRegistry::new());
    let mut handles = Vec::new();
    for offset in 0..4_i64 {
        let shared = Arc::clone(&registry);
        handles.push(std::thread::spawn(move || {
            for _ in 0..50 {
                let pool = ids(&[offset, offset + 1, offset + 2]);
                let guard = shared.acquire(&pool, Duration::from_secs(10)).unwrap();
                drop(guard);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_locks_release_when_a_holder_panics() {
    let registry = Arc::new(ResourceLockRegistry::new());
    let shared = Arc::clone(&registry);

    let handle = std::thread::spawn(move || {
        let _guard = shared
            .acquire(&ids(&[42]), Duration::from_millis(100))
            .unwrap();
        panic!("persistence failure mid-commit");
    });
    assert!(handle.join().is_err());

    // The guard's drop ran during unwind, so the lock is free again
    assert!(!registry.is_locked(ResourceId::new(42)));
    assert!(
        registry
            .acquire(&ids(&[42]), Duration::from_millis(100))
            .is_ok()
    );
}
