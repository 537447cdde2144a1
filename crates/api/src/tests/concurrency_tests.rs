// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    TestEnv, double_pair_env, future_date, future_date_string, single_pair_env, test_actor,
    test_cause,
};
use crate::{ApiError, CommitBookingRequest, commit_booking};
use std::sync::Arc;

fn commit_request(start: &str) -> CommitBookingRequest {
    CommitBookingRequest {
        date: future_date_string(),
        selected_start: String::from(start),
        duration_minutes: 360,
        party_size: 8,
        vehicle_class: None,
    }
}

fn spawn_commit(
    env: &Arc<TestEnv>,
    start: &'static str,
) -> std::thread::JoinHandle<Result<String, ApiError>> {
    let env = Arc::clone(env);
    std::thread::spawn(move || {
        commit_booking(
            &env.persistence,
            &env.locks,
            env.directory.as_ref(),
            env.rules.as_ref(),
            &env.config,
            &test_actor(),
            &test_cause(),
            &commit_request(start),
        )
        .map(|response| response.booking.booking_number)
    })
}

#[test]
fn test_contended_commits_produce_exactly_one_winner() {
    // One feasible pair, four concurrent commits for the same window:
    // exactly one succeeds, the rest are told to re-query.
    let env = Arc::new(single_pair_env());

    let handles: Vec<_> = (0..4).map(|_| spawn_commit(&env, "10:00:00")).collect();
    let results: Vec<Result<String, ApiError>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners: Vec<&String> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert!(winners[0].ends_with("-00001"));

    for loser in results.iter().filter(|r| r.is_err()) {
        assert!(matches!(
            loser,
            Err(ApiError::SlotNoLongerAvailable { .. })
        ));
    }

    // No partial bookings: exactly one record, one assignment, no gaps
    let mut persistence = env.persistence.lock().unwrap();
    let on_date = persistence.bookings_on_date(future_date()).unwrap();
    assert_eq!(on_date.len(), 1);
    let booking_id = on_date[0].booking_id.unwrap();
    assert!(persistence.assignment_for_booking(booking_id).unwrap().is_some());
    let year = future_date().year();
    assert_eq!(
        persistence.booking_numbers_for_year(year).unwrap().len(),
        1
    );
}

#[test]
fn test_disjoint_windows_commit_in_parallel() {
    // Two pairs, two non-overlapping windows: both commits succeed.
    let env = Arc::new(double_pair_env());

    let first = spawn_commit(&env, "08:00:00");
    let second = spawn_commit(&env, "14:00:00");

    let first = first.join().unwrap();
    let second = second.join().unwrap();
    assert!(first.is_ok(), "{first:?}");
    assert!(second.is_ok(), "{second:?}");

    let mut persistence = env.persistence.lock().unwrap();
    assert_eq!(persistence.bookings_on_date(future_date()).unwrap().len(), 2);
}

#[test]
fn test_contention_over_two_pairs_fills_both_then_rejects() {
    // Four concurrent commits for the same window over two pairs:
    // exactly two succeed with distinct pairs, two are rejected.
    let env = Arc::new(double_pair_env());

    let handles: Vec<_> = (0..4).map(|_| spawn_commit(&env, "10:00:00")).collect();
    let results: Vec<Result<String, ApiError>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 2);

    let mut persistence = env.persistence.lock().unwrap();
    let on_date = persistence.bookings_on_date(future_date()).unwrap();
    assert_eq!(on_date.len(), 2);
    // Each winner holds a distinct vehicle and a distinct driver
    assert_ne!(on_date[0].vehicle_id, on_date[1].vehicle_id);
    assert_ne!(on_date[0].driver_id, on_date[1].driver_id);
}
