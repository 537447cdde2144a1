// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the booking core.
//!
//! The read-only handlers (`check_availability`, `quote_price`, lookups)
//! run against point-in-time snapshots and may execute fully in
//! parallel. `commit_booking` is the only mutating entry point; it walks
//! the commit state machine - validate, lock, re-check, persist - and
//! always returns a decision rather than retrying internally. Retry
//! policy belongs to the caller, who may prefer offering an alternative
//! slot over hammering the same one.

use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};
use tracing::{debug, error, info, warn};

use tour_book::{
    ResourceDirectory, ResourceLockRegistry, RuleStore, candidate_resources, evaluate_price,
    find_availability, select_assignment, snapshot_rules,
};
use tour_book_domain::{
    Booking, BookingConfig, BookingRequest, BookingStatus, Resource, ResourceId, RuleSnapshot,
    TimeWindow, VehicleClass,
};
use tour_book_persistence::{BookingDraft, Persistence};
use tour_book_timeline::{Actor, Cause};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    BookingActionResponse, BookingInfo, CheckAvailabilityRequest, CheckAvailabilityResponse,
    CommitBookingRequest, CommitBookingResponse, GetTimelineResponse, PriceBreakdownInfo,
    QuotePriceRequest, QuotePriceResponse, TimelineEventInfo,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Formats a time of day as `HH:MM:SS` for DTOs.
#[must_use]
pub(crate) fn format_time_string(value: Time) -> String {
    value
        .format(TIME_FORMAT)
        .unwrap_or_else(|_| String::from("00:00:00"))
}

fn parse_date_field(value: &str, field: &str) -> Result<Date, ApiError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| ApiError::InvalidRequest {
        field: field.to_string(),
        message: format!("'{value}' is not a valid date: {e}"),
    })
}

fn parse_time_field(value: &str, field: &str) -> Result<Time, ApiError> {
    Time::parse(value, TIME_FORMAT).map_err(|e| ApiError::InvalidRequest {
        field: field.to_string(),
        message: format!("'{value}' is not a valid time: {e}"),
    })
}

fn parse_vehicle_class(value: Option<&str>) -> Result<Option<VehicleClass>, ApiError> {
    value
        .map(|raw| VehicleClass::from_str(raw).map_err(translate_domain_error))
        .transpose()
}

/// Locks the shared persistence adapter.
///
/// A poisoned mutex only means another handler panicked while holding
/// it; the adapter itself is still usable, so the poison is cleared
/// rather than propagated.
fn lock_persistence(persistence: &Mutex<Persistence>) -> MutexGuard<'_, Persistence> {
    persistence.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The current UTC date. Horizon checks are anchored here.
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Checks availability for a requested date, duration, and party size.
///
/// Read-only, idempotent, side-effect free. Resources and rules are
/// snapshotted once; the existing-bookings set is read once. The result
/// is advisory - final assignment happens at commit time under a lock.
///
/// # Errors
///
/// Returns an `ApiError` for malformed input or an out-of-horizon date.
/// A day with no availability is a successful response with a blocking
/// reason, not an error.
pub fn check_availability(
    persistence: &Mutex<Persistence>,
    directory: &dyn ResourceDirectory,
    rules: &dyn RuleStore,
    config: &BookingConfig,
    request: &CheckAvailabilityRequest,
) -> Result<CheckAvailabilityResponse, ApiError> {
    let date: Date = parse_date_field(&request.date, "date")?;
    let start: Option<Time> = request
        .start
        .as_deref()
        .map(|raw| parse_time_field(raw, "start"))
        .transpose()?;
    let vehicle_class = parse_vehicle_class(request.vehicle_class.as_deref())?;

    let domain_request = BookingRequest::new(
        date,
        start,
        request.duration_minutes,
        request.party_size,
        vehicle_class,
    );

    let resources: Vec<Resource> = directory.list_active_resources(date);
    let snapshot: RuleSnapshot = snapshot_rules(rules);
    let existing: Vec<Booking> = lock_persistence(persistence)
        .bookings_on_date(date)
        .map_err(translate_persistence_error)?;

    let result = find_availability(
        &domain_request,
        &resources,
        &snapshot,
        &existing,
        config,
        today(),
    )
    .map_err(translate_core_error)?;

    debug!(
        date = %date,
        available = result.available,
        slots = result.slots.len(),
        "Computed availability"
    );
    Ok(CheckAvailabilityResponse::from_result(&result))
}

/// Quotes the price for a request.
///
/// Read-only. For a fixed rule snapshot the quote is a pure function of
/// the request.
///
/// # Errors
///
/// Returns an `ApiError` for malformed input, an unpriceable request
/// (no matching rule), or colliding rules. Rule collisions are logged at
/// high severity: they are configuration defects, not user errors.
pub fn quote_price(
    rules: &dyn RuleStore,
    config: &BookingConfig,
    request: &QuotePriceRequest,
) -> Result<QuotePriceResponse, ApiError> {
    let date: Date = parse_date_field(&request.date, "date")?;
    let vehicle_class = parse_vehicle_class(request.vehicle_class.as_deref())?;

    let domain_request = BookingRequest::new(
        date,
        None,
        request.duration_minutes,
        request.party_size,
        vehicle_class,
    );
    let snapshot: RuleSnapshot = snapshot_rules(rules);

    let breakdown = evaluate_price(&domain_request, &snapshot, config).map_err(|err| {
        let translated = translate_core_error(err);
        if matches!(
            translated,
            ApiError::AmbiguousRule { .. } | ApiError::RuleConfiguration { .. }
        ) {
            error!(%translated, "Pricing rule store is misconfigured");
        }
        translated
    })?;

    Ok(QuotePriceResponse {
        breakdown: PriceBreakdownInfo::from_breakdown(&breakdown),
        snapshot_version: snapshot.version,
    })
}

/// Commits a booking at a selected start time.
///
/// The only mutating entry point. Walks the commit state machine:
///
/// 1. *Validating* - re-runs availability and pricing against current
///    data, without locks.
/// 2. *Locking* - acquires per-resource locks over the candidate pool in
///    ascending resource-id order, bounded by the commit deadline.
/// 3. *Assigning* - re-checks conflicts under lock against the
///    authoritative bookings set and picks the lowest-id feasible pair.
/// 4. *Persisting* - writes the booking, assignment, sequence
///    allocation, and timeline event as one transaction.
///
/// Locks are released on every exit path, including panics during
/// persistence. A lost slot is returned as the retryable
/// `SlotNoLongerAvailable`; the caller decides whether to re-query and
/// offer an alternative.
///
/// # Errors
///
/// * `ApiError::InvalidRequest` / `ApiError::OutOfWindow` for malformed
///   input (never reaches the engine)
/// * `ApiError::SlotNoLongerAvailable` when the slot was lost to a
///   concurrent commit (expected under contention)
/// * `ApiError::AmbiguousRule` / `ApiError::RuleConfiguration` for rule
///   store defects
/// * `ApiError::Persistence` for infrastructure failures and
///   commit-deadline overruns; the transaction is rolled back first
#[allow(clippy::too_many_arguments)]
pub fn commit_booking(
    persistence: &Mutex<Persistence>,
    locks: &ResourceLockRegistry,
    directory: &dyn ResourceDirectory,
    rules: &dyn RuleStore,
    config: &BookingConfig,
    actor: &Actor,
    cause: &Cause,
    request: &CommitBookingRequest,
) -> Result<CommitBookingResponse, ApiError> {
    let date: Date = parse_date_field(&request.date, "date")?;
    let selected_start: Time = parse_time_field(&request.selected_start, "selected_start")?;
    let vehicle_class = parse_vehicle_class(request.vehicle_class.as_deref())?;

    let domain_request = BookingRequest::new(
        date,
        Some(selected_start),
        request.duration_minutes,
        request.party_size,
        vehicle_class,
    );

    let resources: Vec<Resource> = directory.list_active_resources(date);
    let snapshot: RuleSnapshot = snapshot_rules(rules);

    // Validating: confirm feasibility and obtain the authoritative price
    // against current data, without holding any lock.
    let existing: Vec<Booking> = lock_persistence(persistence)
        .bookings_on_date(date)
        .map_err(translate_persistence_error)?;
    let precheck = find_availability(
        &domain_request,
        &resources,
        &snapshot,
        &existing,
        config,
        today(),
    )
    .map_err(translate_core_error)?;
    if !precheck.available {
        let reason = precheck
            .blocking_reason
            .map_or_else(|| String::from("slot is not feasible"), |r| r.to_string());
        // Expected under contention; a retry signal, not an error
        debug!(date = %date, start = %request.selected_start, %reason, "Slot lost before locking");
        return Err(ApiError::SlotNoLongerAvailable { reason });
    }
    let breakdown = evaluate_price(&domain_request, &snapshot, config).map_err(|err| {
        let translated = translate_core_error(err);
        if matches!(translated, ApiError::AmbiguousRule { .. }) {
            error!(%translated, "Pricing rule store is misconfigured");
        }
        translated
    })?;

    // Locking: per-resource locks over the candidate pool, ascending id
    // order, bounded by the commit deadline.
    let started = Instant::now();
    let pool: Vec<ResourceId> = candidate_resources(&domain_request, &resources, &snapshot);
    let guard = locks
        .acquire(&pool, config.commit_timeout())
        .map_err(|err| {
            warn!(date = %date, "Commit deadline expired while acquiring resource locks");
            translate_core_error(err)
        })?;

    // Assigning: re-check under lock against the authoritative set; a
    // concurrent commit may have landed since validation.
    let authoritative: Vec<Booking> = lock_persistence(persistence)
        .bookings_on_date(date)
        .map_err(translate_persistence_error)?;
    let choice = select_assignment(
        &domain_request,
        selected_start,
        &resources,
        &snapshot,
        &authoritative,
        config,
    )
    .map_err(translate_core_error)?;
    let Some(choice) = choice else {
        debug!(date = %date, start = %request.selected_start, "Slot lost to a concurrent commit");
        return Err(ApiError::SlotNoLongerAvailable {
            reason: String::from("another booking took the last feasible vehicle/driver pair"),
        });
    };

    // Persisting: the deadline covers this phase too; once the
    // transaction opens it runs to commit or rollback.
    if started.elapsed() > config.commit_timeout() {
        return Err(ApiError::Persistence {
            message: String::from("Commit phase deadline exceeded before persistence"),
        });
    }
    let window = TimeWindow::from_start_and_duration(date, selected_start, request.duration_minutes)
        .map_err(translate_domain_error)?;
    let draft = BookingDraft {
        number_prefix: config.number_prefix().to_string(),
        vehicle_id: choice.vehicle_id,
        driver_id: choice.driver_id,
        window,
        party_size: request.party_size,
        breakdown,
    };
    let booking: Booking = lock_persistence(persistence)
        .commit_booking(&draft, actor, cause)
        .map_err(translate_persistence_error)?;

    info!(
        number = %booking.number,
        vehicle_id = choice.vehicle_id.value(),
        driver_id = choice.driver_id.value(),
        "Committed booking"
    );

    let response = CommitBookingResponse {
        message: format!("Booking {} committed", booking.number),
        booking: BookingInfo::from_booking(&booking),
    };
    drop(guard);
    Ok(response)
}

/// Releases a held booking, freeing its resources immediately.
///
/// Used by the hold-expiry reaper and by callers abandoning a hold. Only
/// `held` bookings can be released; cancelling a confirmed booking is a
/// distinct administrative action.
///
/// # Errors
///
/// Returns an `ApiError` if the booking does not exist or is not held.
pub fn release_booking(
    persistence: &Mutex<Persistence>,
    actor: &Actor,
    cause: &Cause,
    booking_id: i64,
) -> Result<BookingActionResponse, ApiError> {
    let current: Booking = lock_persistence(persistence)
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?;
    if current.status != BookingStatus::Held {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("booking_lifecycle"),
            message: format!(
                "Release applies to held bookings; booking {booking_id} is {}",
                current.status
            ),
        });
    }
    transition(
        persistence,
        actor,
        cause,
        booking_id,
        BookingStatus::Cancelled,
        "ReleaseBooking",
        "released",
    )
}

/// Confirms a held booking (e.g., after payment).
///
/// # Errors
///
/// Returns an `ApiError` if the booking does not exist or the lifecycle
/// forbids the transition.
pub fn confirm_booking(
    persistence: &Mutex<Persistence>,
    actor: &Actor,
    cause: &Cause,
    booking_id: i64,
) -> Result<BookingActionResponse, ApiError> {
    transition(
        persistence,
        actor,
        cause,
        booking_id,
        BookingStatus::Confirmed,
        "ConfirmBooking",
        "confirmed",
    )
}

/// Marks a confirmed booking as completed after the trip.
///
/// # Errors
///
/// Returns an `ApiError` if the booking does not exist or the lifecycle
/// forbids the transition.
pub fn complete_booking(
    persistence: &Mutex<Persistence>,
    actor: &Actor,
    cause: &Cause,
    booking_id: i64,
) -> Result<BookingActionResponse, ApiError> {
    transition(
        persistence,
        actor,
        cause,
        booking_id,
        BookingStatus::Completed,
        "CompleteBooking",
        "completed",
    )
}

/// Administratively cancels a held or confirmed booking.
///
/// The resource assignment is deleted in the same transaction, so the
/// vehicle and driver free immediately.
///
/// # Errors
///
/// Returns an `ApiError` if the booking does not exist or the lifecycle
/// forbids the transition.
pub fn cancel_booking(
    persistence: &Mutex<Persistence>,
    actor: &Actor,
    cause: &Cause,
    booking_id: i64,
) -> Result<BookingActionResponse, ApiError> {
    transition(
        persistence,
        actor,
        cause,
        booking_id,
        BookingStatus::Cancelled,
        "CancelBooking",
        "cancelled",
    )
}

fn transition(
    persistence: &Mutex<Persistence>,
    actor: &Actor,
    cause: &Cause,
    booking_id: i64,
    new_status: BookingStatus,
    action_name: &str,
    verb: &str,
) -> Result<BookingActionResponse, ApiError> {
    let booking: Booking = lock_persistence(persistence)
        .transition_booking_status(booking_id, new_status, action_name, actor, cause)
        .map_err(translate_persistence_error)?;

    info!(number = %booking.number, status = %booking.status, "Booking {verb}");
    Ok(BookingActionResponse {
        message: format!("Booking {} {verb}", booking.number),
        booking: BookingInfo::from_booking(&booking),
    })
}

/// Retrieves a booking by its canonical id.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no such booking exists.
pub fn get_booking(
    persistence: &Mutex<Persistence>,
    booking_id: i64,
) -> Result<BookingInfo, ApiError> {
    let booking: Booking = lock_persistence(persistence)
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?;
    Ok(BookingInfo::from_booking(&booking))
}

/// Retrieves a booking by its customer-facing number.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no booking carries the
/// number.
pub fn get_booking_by_number(
    persistence: &Mutex<Persistence>,
    booking_number: &str,
) -> Result<BookingInfo, ApiError> {
    let booking: Booking = lock_persistence(persistence)
        .get_booking_by_number(booking_number)
        .map_err(translate_persistence_error)?;
    Ok(BookingInfo::from_booking(&booking))
}

/// Retrieves the ordered timeline for a booking.
///
/// # Errors
///
/// Returns an `ApiError` if the timeline cannot be read.
pub fn get_booking_timeline(
    persistence: &Mutex<Persistence>,
    booking_id: i64,
) -> Result<GetTimelineResponse, ApiError> {
    let events = lock_persistence(persistence)
        .booking_timeline(booking_id)
        .map_err(translate_persistence_error)?;
    Ok(GetTimelineResponse {
        booking_id,
        events: events.iter().map(TimelineEventInfo::from_event).collect(),
    })
}
