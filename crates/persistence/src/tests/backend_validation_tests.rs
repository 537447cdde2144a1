// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for multi-database support.
//!
//! These tests validate that the persistence layer works correctly
//! across different database backends (`SQLite`, MariaDB/MySQL).
//!
//! ## Test Execution
//!
//! - `SQLite` tests run normally via `cargo test`
//! - MariaDB/MySQL tests are marked `#[ignore]` and run only via
//!   `cargo xtask test-mariadb`
//!
//! ## Infrastructure Requirements
//!
//! `MariaDB` tests require:
//! - `DATABASE_URL` environment variable (set by xtask)
//! - `TOURBOOK_TEST_BACKEND=mariadb` environment variable
//! - Running `MariaDB` instance (provisioned by xtask)
//!
//! Tests fail fast if required infrastructure is missing.
//!
//! These tests focus on **infrastructure and schema compatibility**, not
//! business logic: migrations apply cleanly, constraints are enforced,
//! and the commit transaction behaves identically on both backends.
//! Business logic is validated by the standard suite against `SQLite`.

use std::env;

use crate::tests::{create_test_actor, create_test_cause, create_test_draft};
use crate::{Persistence, PersistenceError};
use tour_book_domain::BookingStatus;

/// Helper to get the `MariaDB` connection URL from the environment.
///
/// # Panics
///
/// Panics with a clear message if the xtask-provisioned environment is
/// missing, so a misconfigured run fails fast instead of silently
/// skipping.
fn mariadb_url() -> String {
    assert_eq!(
        env::var("TOURBOOK_TEST_BACKEND").as_deref(),
        Ok("mariadb"),
        "Backend validation tests must run via `cargo xtask test-mariadb`"
    );
    env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set by `cargo xtask test-mariadb`")
}

#[test]
fn test_sqlite_initialization_enforces_foreign_keys() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
#[ignore = "Requires MariaDB; run via `cargo xtask test-mariadb`"]
fn test_mariadb_migrations_apply_and_enforce_foreign_keys() {
    let mut persistence: Persistence = Persistence::new_with_mysql(&mariadb_url()).unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
#[ignore = "Requires MariaDB; run via `cargo xtask test-mariadb`"]
fn test_mariadb_commit_round_trips() {
    let mut persistence: Persistence = Persistence::new_with_mysql(&mariadb_url()).unwrap();

    let booking = persistence
        .commit_booking(
            &create_test_draft(10, 16),
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap();
    let booking_id = booking.booking_id.unwrap();

    let stored = persistence.get_booking(booking_id).unwrap();
    assert_eq!(stored.status, BookingStatus::Held);
    assert_eq!(stored.number, booking.number);
    assert!(persistence.assignment_for_booking(booking_id).unwrap().is_some());
}

#[test]
#[ignore = "Requires MariaDB; run via `cargo xtask test-mariadb`"]
fn test_mariadb_aborted_commit_rolls_back() {
    let mut persistence: Persistence = Persistence::new_with_mysql(&mariadb_url()).unwrap();

    let before = persistence.current_sequence_value(2026).unwrap();

    let mut broken = create_test_draft(10, 16);
    broken.number_prefix = String::from("tb");
    let result = persistence.commit_booking(
        &broken,
        &create_test_actor(),
        &create_test_cause(),
    );
    assert!(matches!(result, Err(PersistenceError::InvalidRecord(_))));

    // The allocation inside the aborted transaction is invisible
    assert_eq!(persistence.current_sequence_value(2026).unwrap(), before);
}
