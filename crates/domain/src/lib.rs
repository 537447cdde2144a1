// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking;
mod config;
mod error;
mod money;
mod request;
mod resource;
mod rules;
mod time_window;
mod validation;

#[cfg(test)]
mod tests;

pub use booking::{Booking, BookingNumber, BookingStatus, ResourceAssignment};
pub use config::BookingConfig;
pub use error::DomainError;
pub use money::{Money, PriceBreakdown, PriceModifier, split_deposit};
pub use request::BookingRequest;
pub use resource::{Resource, ResourceId, ResourceKind, VehicleClass};
pub use rules::{
    AvailabilityRule, DayOfWeek, DurationBucket, PricingRule, RuleConditions, RuleContext,
    RuleSnapshot, Season,
};
pub use time_window::{
    Interval, MINUTES_PER_DAY, TimeWindow, intersect_intervals, minute_of, subtract_interval,
    time_from_minute,
};
pub use validation::validate_booking_request;
