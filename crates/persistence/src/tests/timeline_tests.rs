// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::tests::{create_test_actor, create_test_cause, create_test_draft};
use tour_book_domain::BookingStatus;
use tour_book_timeline::TimelineEvent;

#[test]
fn test_timeline_records_the_full_lifecycle_in_order() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let booking_id: i64 = persistence
        .commit_booking(
            &create_test_draft(10, 16),
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap()
        .booking_id
        .unwrap();

    persistence
        .transition_booking_status(
            booking_id,
            BookingStatus::Confirmed,
            "ConfirmBooking",
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap();
    persistence
        .transition_booking_status(
            booking_id,
            BookingStatus::Completed,
            "CompleteBooking",
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap();

    let timeline: Vec<TimelineEvent> = persistence.booking_timeline(booking_id).unwrap();
    assert_eq!(timeline.len(), 3);

    assert_eq!(timeline[0].action.name, "CommitBooking");
    assert_eq!(timeline[0].before, None);
    assert_eq!(timeline[0].after, BookingStatus::Held);

    assert_eq!(timeline[1].action.name, "ConfirmBooking");
    assert_eq!(timeline[1].before, Some(BookingStatus::Held));
    assert_eq!(timeline[1].after, BookingStatus::Confirmed);

    assert_eq!(timeline[2].action.name, "CompleteBooking");
    assert_eq!(timeline[2].before, Some(BookingStatus::Confirmed));
    assert_eq!(timeline[2].after, BookingStatus::Completed);
}

#[test]
fn test_timeline_events_carry_actor_and_cause() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let booking_id: i64 = persistence
        .commit_booking(
            &create_test_draft(10, 16),
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap()
        .booking_id
        .unwrap();

    let timeline: Vec<TimelineEvent> = persistence.booking_timeline(booking_id).unwrap();
    assert_eq!(timeline[0].actor.id, "op-1");
    assert_eq!(timeline[0].actor.actor_type, "operator");
    assert_eq!(timeline[0].cause.id, "req-1");
    assert_eq!(timeline[0].cause.description, "Test booking");
    assert!(timeline[0].event_id.is_some());
}

#[test]
fn test_timeline_is_empty_for_unknown_bookings() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.booking_timeline(9_999).unwrap().is_empty());
}
