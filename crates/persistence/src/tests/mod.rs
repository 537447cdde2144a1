// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod backend_validation_tests;
mod timeline_tests;

use crate::BookingDraft;
use time::{Date, Month, Time};
use tour_book_domain::{Money, PriceBreakdown, ResourceId, TimeWindow};
use tour_book_timeline::{Actor, Cause};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("op-1"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test booking"))
}

/// A trip date inside the standard horizon.
pub fn create_test_date() -> Date {
    Date::from_calendar_date(2026, Month::June, 15).unwrap()
}

pub fn create_test_breakdown() -> PriceBreakdown {
    PriceBreakdown::new(
        Money::from_minor_units(50_000),
        Vec::new(),
        Money::from_minor_units(110_000),
        Money::from_minor_units(110_000),
        2_500,
    )
    .unwrap()
}

/// Builds a draft for vehicle 1 / driver 10 on the test date.
pub fn create_test_draft(start_hour: u8, end_hour: u8) -> BookingDraft {
    BookingDraft {
        number_prefix: String::from("TB"),
        vehicle_id: ResourceId::new(1),
        driver_id: ResourceId::new(10),
        window: TimeWindow::new(
            create_test_date(),
            Time::from_hms(start_hour, 0, 0).unwrap(),
            Time::from_hms(end_hour, 0, 0).unwrap(),
        )
        .unwrap(),
        party_size: 8,
        breakdown: create_test_breakdown(),
    }
}

/// Builds a draft on a specific date.
pub fn create_test_draft_on(date: Date, start_hour: u8, end_hour: u8) -> BookingDraft {
    BookingDraft {
        window: TimeWindow::new(
            date,
            Time::from_hms(start_hour, 0, 0).unwrap(),
            Time::from_hms(end_hour, 0, 0).unwrap(),
        )
        .unwrap(),
        ..create_test_draft(start_hour, end_hour)
    }
}
