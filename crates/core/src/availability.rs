// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The availability and conflict engine.
//!
//! Given a requested date, duration, and party size, computes which start
//! slots have at least one vehicle *and* one driver simultaneously free.
//! Vehicle and driver availability are intersected, never unioned: a slot
//! with a free vehicle but no free driver is not available.
//!
//! The engine is pure: it operates on a resource snapshot, a rule
//! snapshot, and the existing-bookings set supplied by the caller, and it
//! never performs I/O. When no slot is feasible the result carries the
//! specific blocking reason so callers can tell a blackout from a
//! capacity ceiling from plain contention.

use crate::error::CoreError;
use time::Time;
use tour_book_domain::{
    Booking, BookingConfig, BookingRequest, Interval, Resource, ResourceId, ResourceKind,
    RuleSnapshot, minute_of, subtract_interval, time_from_minute, validate_booking_request,
};

/// Why no feasible window exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockingReason {
    /// No active resource can serve the request at all (party size,
    /// vehicle class, or nothing active on the date).
    NoEligibleResources {
        /// Operator-facing detail.
        detail: String,
    },
    /// Every otherwise-eligible resource is covered by a blackout.
    Blackout {
        /// The blackout's stated reason.
        reason: String,
    },
    /// The per-day booking ceiling for a resource kind is already met.
    CapacityReached {
        /// The constrained resource kind.
        resource_kind: ResourceKind,
        /// The configured ceiling.
        max_per_day: u32,
    },
    /// Resources exist but no common free window of the requested
    /// duration remains.
    NoOverlap,
}

impl std::fmt::Display for BlockingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEligibleResources { detail } => write!(f, "No eligible resources: {detail}"),
            Self::Blackout { reason } => write!(f, "Blackout: {reason}"),
            Self::CapacityReached {
                resource_kind,
                max_per_day,
            } => {
                write!(
                    f,
                    "Daily {resource_kind} booking ceiling of {max_per_day} reached"
                )
            }
            Self::NoOverlap => write!(f, "No overlapping free window of the requested duration"),
        }
    }
}

/// An advisory vehicle/driver pairing for the earliest feasible slot.
///
/// Advisory only: final assignment happens at commit time under a lock,
/// because availability can change between query and commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedPair {
    /// The suggested vehicle.
    pub vehicle_id: ResourceId,
    /// The suggested driver.
    pub driver_id: ResourceId,
    /// The slot the suggestion applies to.
    pub start: Time,
}

/// The outcome of an availability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityResult {
    /// Whether at least one feasible slot exists.
    pub available: bool,
    /// The feasible start times, ascending.
    pub slots: Vec<Time>,
    /// Advisory pairing for the earliest feasible slot.
    pub suggestion: Option<SuggestedPair>,
    /// The blocking reason when `available` is false.
    pub blocking_reason: Option<BlockingReason>,
    /// The rule snapshot version this result was computed against.
    pub snapshot_version: u64,
}

impl AvailabilityResult {
    fn blocked(snapshot_version: u64, reason: BlockingReason) -> Self {
        Self {
            available: false,
            slots: Vec::new(),
            suggestion: None,
            blocking_reason: Some(reason),
            snapshot_version,
        }
    }

    fn open(snapshot_version: u64, slots: Vec<Time>, suggestion: Option<SuggestedPair>) -> Self {
        Self {
            available: true,
            slots,
            suggestion,
            blocking_reason: None,
            snapshot_version,
        }
    }
}

/// The eligible resources for one request, with elimination bookkeeping
/// so a zero-candidate outcome can name its cause.
pub(crate) struct CandidatePool {
    /// Eligible vehicles, ascending by resource id.
    pub vehicles: Vec<Resource>,
    /// Eligible drivers, ascending by resource id.
    pub drivers: Vec<Resource>,
    /// Whether any active vehicle fit the party/class before blackouts.
    pub had_fitting_vehicle: bool,
    /// Whether any driver was active before blackouts.
    pub had_active_driver: bool,
    /// The first blackout reason that eliminated a candidate.
    pub blackout_reason: Option<String>,
}

impl CandidatePool {
    fn no_resource_reason(&self, request: &BookingRequest) -> BlockingReason {
        if self.vehicles.is_empty() {
            if self.had_fitting_vehicle {
                if let Some(reason) = &self.blackout_reason {
                    return BlockingReason::Blackout {
                        reason: reason.clone(),
                    };
                }
            }
            let detail = request.vehicle_class.map_or_else(
                || {
                    format!(
                        "no active vehicle seats a party of {} on {}",
                        request.party_size, request.date
                    )
                },
                |class| {
                    format!(
                        "no active {class} seats a party of {} on {}",
                        request.party_size, request.date
                    )
                },
            );
            return BlockingReason::NoEligibleResources { detail };
        }
        if self.had_active_driver {
            if let Some(reason) = &self.blackout_reason {
                return BlockingReason::Blackout {
                    reason: reason.clone(),
                };
            }
        }
        BlockingReason::NoEligibleResources {
            detail: format!("no active driver on {}", request.date),
        }
    }
}

/// Filters the resource snapshot down to the candidates for one request.
pub(crate) fn build_candidate_pool(
    request: &BookingRequest,
    resources: &[Resource],
    rules: &RuleSnapshot,
) -> CandidatePool {
    let mut blackout_reason: Option<String> = None;

    let fitting: Vec<&Resource> = resources
        .iter()
        .filter(|resource| {
            resource.kind == ResourceKind::Vehicle
                && resource.active
                && resource.capacity.is_some_and(|c| c >= request.party_size)
                && request
                    .vehicle_class
                    .is_none_or(|class| resource.vehicle_class == Some(class))
        })
        .collect();
    let had_fitting_vehicle = !fitting.is_empty();

    let mut vehicles: Vec<Resource> = Vec::with_capacity(fitting.len());
    for resource in fitting {
        if let Some(reason) = rules.blackout_reason(resource.resource_id, request.date) {
            blackout_reason.get_or_insert_with(|| reason.to_string());
        } else {
            vehicles.push(resource.clone());
        }
    }
    vehicles.sort_by_key(|resource| resource.resource_id);

    let active_drivers: Vec<&Resource> = resources
        .iter()
        .filter(|resource| resource.kind == ResourceKind::Driver && resource.active)
        .collect();
    let had_active_driver = !active_drivers.is_empty();

    let mut drivers: Vec<Resource> = Vec::with_capacity(active_drivers.len());
    for resource in active_drivers {
        if let Some(reason) = rules.blackout_reason(resource.resource_id, request.date) {
            blackout_reason.get_or_insert_with(|| reason.to_string());
        } else {
            drivers.push(resource.clone());
        }
    }
    drivers.sort_by_key(|resource| resource.resource_id);

    CandidatePool {
        vehicles,
        drivers,
        had_fitting_vehicle,
        had_active_driver,
        blackout_reason,
    }
}

/// Counts bookings occupying resources on a date.
fn day_booking_count(existing: &[Booking], date: time::Date) -> u32 {
    u32::try_from(
        existing
            .iter()
            .filter(|booking| booking.window.date == date && booking.status.occupies_resources())
            .count(),
    )
    .unwrap_or(u32::MAX)
}

/// Returns the capacity rule a new booking on the date would violate.
pub(crate) fn capacity_block(
    rules: &RuleSnapshot,
    existing: &[Booking],
    date: time::Date,
) -> Option<(ResourceKind, u32)> {
    let count = day_booking_count(existing, date);
    for kind in [ResourceKind::Vehicle, ResourceKind::Driver] {
        if let Some(max_per_day) = rules.capacity_limit(kind) {
            if count >= max_per_day {
                return Some((kind, max_per_day));
            }
        }
    }
    None
}

/// Computes a resource's free sub-intervals within the operating day.
///
/// Every existing booking touching the resource (any status except
/// cancelled) is expanded by the buffer on both sides and subtracted from
/// the operating hours.
pub(crate) fn free_intervals(
    resource_id: ResourceId,
    operating: Interval,
    existing: &[Booking],
    date: time::Date,
    buffer_minutes: u32,
) -> Vec<Interval> {
    let mut free: Vec<Interval> = vec![operating];
    for booking in existing {
        if booking.window.date != date
            || !booking.status.occupies_resources()
            || !booking.uses_resource(resource_id)
        {
            continue;
        }
        free = subtract_interval(&free, booking.window.buffered_interval(buffer_minutes));
        if free.is_empty() {
            break;
        }
    }
    free
}

/// The candidate start minutes for a request.
pub(crate) fn slot_starts(request: &BookingRequest, config: &BookingConfig) -> Vec<u16> {
    let open = minute_of(config.day_open());
    let close = minute_of(config.day_close());
    if let Some(start) = request.start {
        return vec![minute_of(start)];
    }
    let step = u16::try_from(config.slot_granularity_minutes().min(1440)).unwrap_or(60);
    let mut starts: Vec<u16> = Vec::new();
    let mut cursor = open;
    while cursor < close {
        starts.push(cursor);
        cursor = cursor.saturating_add(step);
    }
    starts
}

/// Computes the feasible start slots for a booking request.
///
/// Implements the full conflict pipeline: request validation, resource
/// eligibility (capacity, class, activity, blackout), buffered occupied
/// intervals, free-interval subtraction, vehicle x driver intersection,
/// and per-day capacity ceilings. See the module documentation for the
/// blocking-reason contract.
///
/// # Arguments
///
/// * `request` - The booking request
/// * `resources` - A point-in-time snapshot of the resource directory
/// * `rules` - A versioned rule snapshot
/// * `existing` - The existing bookings overlapping the target date
/// * `config` - The operational configuration
/// * `today` - The current date, supplied by the caller for determinism
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` for malformed requests (bad
/// duration, non-positive party size, out-of-horizon date) and for
/// inconsistent rule snapshots. A zero-availability day is *not* an
/// error; it is a result with a blocking reason.
pub fn find_availability(
    request: &BookingRequest,
    resources: &[Resource],
    rules: &RuleSnapshot,
    existing: &[Booking],
    config: &BookingConfig,
    today: time::Date,
) -> Result<AvailabilityResult, CoreError> {
    validate_booking_request(request, config, today)?;
    rules.validate()?;

    let pool = build_candidate_pool(request, resources, rules);
    if pool.vehicles.is_empty() || pool.drivers.is_empty() {
        return Ok(AvailabilityResult::blocked(
            rules.version,
            pool.no_resource_reason(request),
        ));
    }

    if let Some((resource_kind, max_per_day)) = capacity_block(rules, existing, request.date) {
        return Ok(AvailabilityResult::blocked(
            rules.version,
            BlockingReason::CapacityReached {
                resource_kind,
                max_per_day,
            },
        ));
    }

    let buffer = rules.buffer_minutes();
    let operating = Interval {
        start: minute_of(config.day_open()),
        end: minute_of(config.day_close()),
    };
    let duration = u16::try_from(request.duration_minutes).map_err(|_| {
        CoreError::DomainViolation(tour_book_domain::DomainError::InvalidDuration {
            minutes: request.duration_minutes,
        })
    })?;

    let vehicle_free: Vec<(ResourceId, Vec<Interval>)> = pool
        .vehicles
        .iter()
        .map(|resource| {
            (
                resource.resource_id,
                free_intervals(resource.resource_id, operating, existing, request.date, buffer),
            )
        })
        .collect();
    let driver_free: Vec<(ResourceId, Vec<Interval>)> = pool
        .drivers
        .iter()
        .map(|resource| {
            (
                resource.resource_id,
                free_intervals(resource.resource_id, operating, existing, request.date, buffer),
            )
        })
        .collect();

    let has_span = |free: &[(ResourceId, Vec<Interval>)], start: u16| {
        free.iter()
            .any(|(_, intervals)| intervals.iter().any(|i| i.contains_span(start, duration)))
    };

    let mut slots: Vec<u16> = Vec::new();
    for start in slot_starts(request, config) {
        if u32::from(start) + u32::from(duration) > u32::from(operating.end) {
            continue;
        }
        if has_span(&vehicle_free, start) && has_span(&driver_free, start) {
            slots.push(start);
        }
    }

    if slots.is_empty() {
        return Ok(AvailabilityResult::blocked(
            rules.version,
            BlockingReason::NoOverlap,
        ));
    }

    let earliest = slots[0];
    // Lowest resource id wins the (advisory) suggestion, deterministically
    let suggested_vehicle = vehicle_free
        .iter()
        .find(|(_, intervals)| intervals.iter().any(|i| i.contains_span(earliest, duration)))
        .map(|(id, _)| *id);
    let suggested_driver = driver_free
        .iter()
        .find(|(_, intervals)| intervals.iter().any(|i| i.contains_span(earliest, duration)))
        .map(|(id, _)| *id);

    let suggestion = match (suggested_vehicle, suggested_driver) {
        (Some(vehicle_id), Some(driver_id)) => Some(SuggestedPair {
            vehicle_id,
            driver_id,
            start: time_from_minute(earliest)?,
        }),
        _ => None,
    };

    let slot_times: Result<Vec<Time>, _> = slots.into_iter().map(time_from_minute).collect();

    Ok(AvailabilityResult::open(
        rules.version,
        slot_times?,
        suggestion,
    ))
}
