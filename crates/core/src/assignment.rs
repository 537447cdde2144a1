// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commit-time assignment.
//!
//! Availability results are advisory; between query and commit another
//! booking may land. The coordinator therefore re-checks conflicts under
//! the resource locks against the authoritative existing-bookings set and
//! selects the final vehicle/driver pair here. A `None` choice is the
//! expected contention outcome, not an error.

use crate::availability::{build_candidate_pool, capacity_block, free_intervals};
use crate::error::CoreError;
use time::Time;
use tour_book_domain::{
    Booking, BookingConfig, BookingRequest, Interval, Resource, ResourceId, RuleSnapshot,
    minute_of,
};

/// The vehicle/driver pair selected for a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentChoice {
    /// The selected vehicle.
    pub vehicle_id: ResourceId,
    /// The selected driver.
    pub driver_id: ResourceId,
}

/// Returns the lock set for a commit attempt: every candidate resource
/// that could satisfy the request, ascending by resource id.
///
/// The set is small and statically bounded (the candidate pool of one
/// request), so unrelated bookings never contend.
#[must_use]
pub fn candidate_resources(
    request: &BookingRequest,
    resources: &[Resource],
    rules: &RuleSnapshot,
) -> Vec<ResourceId> {
    let pool = build_candidate_pool(request, resources, rules);
    let mut ids: Vec<ResourceId> = pool
        .vehicles
        .iter()
        .chain(pool.drivers.iter())
        .map(|resource| resource.resource_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Re-checks conflicts and selects the lowest-id feasible pair.
///
/// Must be called while holding the locks for the request's candidate
/// pool, with `existing` read from the authoritative store (not a
/// query-time cache) - this is the one place staleness is not tolerated.
///
/// # Arguments
///
/// * `request` - The booking request
/// * `start` - The selected start time
/// * `resources` - The resource snapshot used for the lock set
/// * `rules` - The rule snapshot
/// * `existing` - The authoritative existing bookings for the target date
/// * `config` - The operational configuration
///
/// # Returns
///
/// * `Ok(Some(choice))` with the lowest-id feasible vehicle and driver
/// * `Ok(None)` if no pair remains feasible (the slot was lost to a
///   concurrent commit)
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the selected start cannot form
/// a window within the operating day.
pub fn select_assignment(
    request: &BookingRequest,
    start: Time,
    resources: &[Resource],
    rules: &RuleSnapshot,
    existing: &[Booking],
    config: &BookingConfig,
) -> Result<Option<AssignmentChoice>, CoreError> {
    if capacity_block(rules, existing, request.date).is_some() {
        return Ok(None);
    }

    let pool = build_candidate_pool(request, resources, rules);
    if pool.vehicles.is_empty() || pool.drivers.is_empty() {
        return Ok(None);
    }

    let operating = Interval {
        start: minute_of(config.day_open()),
        end: minute_of(config.day_close()),
    };
    let start_minute = minute_of(start);
    let duration = u16::try_from(request.duration_minutes).map_err(|_| {
        CoreError::DomainViolation(tour_book_domain::DomainError::InvalidDuration {
            minutes: request.duration_minutes,
        })
    })?;
    if u32::from(start_minute) + u32::from(duration) > u32::from(operating.end)
        || start_minute < operating.start
    {
        return Ok(None);
    }

    let buffer = rules.buffer_minutes();
    let is_free = |resource_id: ResourceId| {
        free_intervals(resource_id, operating, existing, request.date, buffer)
            .iter()
            .any(|interval| interval.contains_span(start_minute, duration))
    };

    // Candidate pools are sorted ascending, so the first hit is lowest-id
    let vehicle_id = pool
        .vehicles
        .iter()
        .map(|resource| resource.resource_id)
        .find(|id| is_free(*id));
    let driver_id = pool
        .drivers
        .iter()
        .map(|resource| resource.resource_id)
        .find(|id| is_free(*id));

    Ok(match (vehicle_id, driver_id) {
        (Some(vehicle_id), Some(driver_id)) => Some(AssignmentChoice {
            vehicle_id,
            driver_id,
        }),
        _ => None,
    })
}
