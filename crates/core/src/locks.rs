// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-resource locks for the commit path.
//!
//! Locks are acquired in ascending resource-id order across all
//! concurrent commit attempts. An attempt may hold lower-numbered locks
//! while waiting on a higher-numbered one, but never the reverse, which
//! makes deadlock impossible. Acquisition is bounded by the commit-phase
//! deadline; on timeout every already-claimed lock is released before the
//! error returns.
//!
//! The guard releases on drop, so locks are freed on every exit path of
//! a commit, including panics during persistence.

use crate::error::CoreError;
use std::collections::BTreeSet;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tour_book_domain::ResourceId;

/// The process-wide registry of locked resources.
///
/// Two commits with disjoint candidate pools proceed fully in parallel;
/// overlapping pools serialize at the contended resource.
#[derive(Debug, Default)]
pub struct ResourceLockRegistry {
    held: Mutex<BTreeSet<ResourceId>>,
    released: Condvar,
}

impl ResourceLockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn held(&self) -> MutexGuard<'_, BTreeSet<ResourceId>> {
        // A poisoned registry only means another commit panicked while
        // holding the set mutex; the set itself is still consistent
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires locks on a set of resources in ascending id order.
    ///
    /// # Arguments
    ///
    /// * `resource_ids` - The candidate pool to lock (order irrelevant;
    ///   duplicates ignored)
    /// * `timeout` - The acquisition deadline
    ///
    /// # Returns
    ///
    /// A guard that releases every acquired lock when dropped.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::LockTimeout` if the deadline expires; any
    /// partially-acquired locks are released first.
    pub fn acquire(
        &self,
        resource_ids: &[ResourceId],
        timeout: Duration,
    ) -> Result<ResourceLockGuard<'_>, CoreError> {
        let mut ordered: Vec<ResourceId> = resource_ids.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let started = Instant::now();
        let deadline = started + timeout;
        let mut claimed: Vec<ResourceId> = Vec::with_capacity(ordered.len());
        let mut held = self.held();

        for id in ordered {
            while held.contains(&id) {
                let now = Instant::now();
                if now >= deadline {
                    for claimed_id in &claimed {
                        held.remove(claimed_id);
                    }
                    drop(held);
                    self.released.notify_all();
                    return Err(CoreError::LockTimeout {
                        waited_ms: u64::try_from(started.elapsed().as_millis())
                            .unwrap_or(u64::MAX),
                    });
                }
                let (guard, _timeout_result) = self
                    .released
                    .wait_timeout(held, deadline - now)
                    .unwrap_or_else(PoisonError::into_inner);
                held = guard;
            }
            held.insert(id);
            claimed.push(id);
        }

        drop(held);
        Ok(ResourceLockGuard {
            registry: self,
            ids: claimed,
        })
    }

    /// Returns whether a resource is currently locked. Test hook.
    #[must_use]
    pub fn is_locked(&self, resource_id: ResourceId) -> bool {
        self.held().contains(&resource_id)
    }
}

/// RAII guard over a set of acquired resource locks.
#[must_use]
pub struct ResourceLockGuard<'a> {
    registry: &'a ResourceLockRegistry,
    ids: Vec<ResourceId>,
}

impl ResourceLockGuard<'_> {
    /// Returns the locked resource ids, ascending.
    #[must_use]
    pub fn resource_ids(&self) -> &[ResourceId] {
        &self.ids
    }
}

impl Drop for ResourceLockGuard<'_> {
    fn drop(&mut self) {
        let mut held = self.registry.held();
        for id in &self.ids {
            held.remove(id);
        }
        drop(held);
        self.registry.released.notify_all();
    }
}
