// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    double_pair_env, future_date_string, single_pair_env, test_actor, test_cause,
};
use crate::{
    ApiError, CheckAvailabilityRequest, CommitBookingRequest, QuotePriceRequest,
    cancel_booking, check_availability, commit_booking, complete_booking, confirm_booking,
    get_booking_by_number, get_booking_timeline, quote_price, release_booking,
};

fn check_request() -> CheckAvailabilityRequest {
    CheckAvailabilityRequest {
        date: future_date_string(),
        start: None,
        duration_minutes: 360,
        party_size: 8,
        vehicle_class: None,
    }
}

fn commit_request(start: &str) -> CommitBookingRequest {
    CommitBookingRequest {
        date: future_date_string(),
        selected_start: String::from(start),
        duration_minutes: 360,
        party_size: 8,
        vehicle_class: None,
    }
}

#[test]
fn test_full_lifecycle_check_quote_commit_confirm_complete() {
    let env = single_pair_env();

    // Check
    let availability = check_availability(
        &env.persistence,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &check_request(),
    )
    .unwrap();
    assert!(availability.available);
    assert!(availability.slots.contains(&String::from("10:00:00")));
    assert_eq!(availability.suggested_vehicle_id, Some(1));
    assert_eq!(availability.suggested_driver_id, Some(10));

    // Quote
    let quote = quote_price(
        env.rules.as_ref(),
        &env.config,
        &QuotePriceRequest {
            date: future_date_string(),
            duration_minutes: 360,
            party_size: 8,
            vehicle_class: None,
        },
    )
    .unwrap();
    assert_eq!(
        quote.breakdown.deposit_minor + quote.breakdown.balance_minor,
        quote.breakdown.total_minor
    );

    // Commit
    let committed = commit_booking(
        &env.persistence,
        &env.locks,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &test_actor(),
        &test_cause(),
        &commit_request("10:00:00"),
    )
    .unwrap();
    assert!(committed.booking.booking_number.ends_with("-00001"));
    assert_eq!(committed.booking.status, "held");
    // The commit-time price matches the quote
    assert_eq!(committed.booking.breakdown, quote.breakdown);

    // Confirm, then complete
    let booking_id = committed.booking.booking_id;
    let confirmed = confirm_booking(&env.persistence, &test_actor(), &test_cause(), booking_id)
        .unwrap();
    assert_eq!(confirmed.booking.status, "confirmed");
    let completed = complete_booking(&env.persistence, &test_actor(), &test_cause(), booking_id)
        .unwrap();
    assert_eq!(completed.booking.status, "completed");

    // The timeline shows the whole lifecycle in order
    let timeline = get_booking_timeline(&env.persistence, booking_id).unwrap();
    let actions: Vec<&str> = timeline.events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(
        actions,
        vec!["CommitBooking", "ConfirmBooking", "CompleteBooking"]
    );

    // Lookup by the customer-facing number
    let found = get_booking_by_number(&env.persistence, &committed.booking.booking_number).unwrap();
    assert_eq!(found.booking_id, booking_id);
}

#[test]
fn test_commit_consumes_the_slot() {
    let env = single_pair_env();

    commit_booking(
        &env.persistence,
        &env.locks,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &test_actor(),
        &test_cause(),
        &commit_request("10:00:00"),
    )
    .unwrap();

    // The same slot on the only pair is gone
    let second = commit_booking(
        &env.persistence,
        &env.locks,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &test_actor(),
        &test_cause(),
        &commit_request("12:00:00"),
    );
    let err = second.unwrap_err();
    assert!(matches!(err, ApiError::SlotNoLongerAvailable { .. }));
    assert!(err.is_retryable());
}

#[test]
fn test_release_frees_the_slot_and_never_reuses_the_number() {
    let env = single_pair_env();

    let committed = commit_booking(
        &env.persistence,
        &env.locks,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &test_actor(),
        &test_cause(),
        &commit_request("10:00:00"),
    )
    .unwrap();

    release_booking(
        &env.persistence,
        &test_actor(),
        &test_cause(),
        committed.booking.booking_id,
    )
    .unwrap();

    // The slot is bookable again immediately
    let availability = check_availability(
        &env.persistence,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &check_request(),
    )
    .unwrap();
    assert!(availability.available);

    // And the released number is never reissued
    let second = commit_booking(
        &env.persistence,
        &env.locks,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &test_actor(),
        &test_cause(),
        &commit_request("10:00:00"),
    )
    .unwrap();
    assert!(second.booking.booking_number.ends_with("-00002"));
}

#[test]
fn test_release_applies_only_to_held_bookings() {
    let env = double_pair_env();

    let committed = commit_booking(
        &env.persistence,
        &env.locks,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &test_actor(),
        &test_cause(),
        &commit_request("10:00:00"),
    )
    .unwrap();
    let booking_id = committed.booking.booking_id;
    confirm_booking(&env.persistence, &test_actor(), &test_cause(), booking_id).unwrap();

    let release = release_booking(&env.persistence, &test_actor(), &test_cause(), booking_id);
    assert!(matches!(
        release,
        Err(ApiError::DomainRuleViolation { .. })
    ));

    // Administrative cancellation of a confirmed booking is the distinct
    // path, and it works
    let cancelled =
        cancel_booking(&env.persistence, &test_actor(), &test_cause(), booking_id).unwrap();
    assert_eq!(cancelled.booking.status, "cancelled");
}

#[test]
fn test_malformed_input_is_rejected_before_the_engine() {
    let env = single_pair_env();

    let mut bad_date = check_request();
    bad_date.date = String::from("15/06/2026");
    let result = check_availability(
        &env.persistence,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &bad_date,
    );
    assert!(matches!(result, Err(ApiError::InvalidRequest { .. })));

    let mut zero_party = check_request();
    zero_party.party_size = 0;
    let result = check_availability(
        &env.persistence,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &zero_party,
    );
    assert!(matches!(result, Err(ApiError::InvalidRequest { .. })));
}

#[test]
fn test_out_of_horizon_commit_is_rejected() {
    let env = single_pair_env();

    let mut far = commit_request("10:00:00");
    far.date = String::from("2031-01-01");
    let result = commit_booking(
        &env.persistence,
        &env.locks,
        env.directory.as_ref(),
        env.rules.as_ref(),
        &env.config,
        &test_actor(),
        &test_cause(),
        &far,
    );
    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::OutOfWindow { .. }));
    assert!(!err.is_retryable());
}
