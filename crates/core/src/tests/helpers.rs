// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use std::time::Duration;
use time::{Date, Month, Time};
use tour_book_domain::{
    Booking, BookingConfig, BookingNumber, BookingRequest, BookingStatus, Money, PriceBreakdown,
    PricingRule, Resource, ResourceId, RuleConditions, RuleSnapshot, TimeWindow, VehicleClass,
};

/// The reference "today" for horizon checks.
pub fn today() -> Date {
    Date::from_calendar_date(2026, Month::June, 1).unwrap()
}

/// A Monday inside the booking horizon.
pub fn monday() -> Date {
    Date::from_calendar_date(2026, Month::June, 15).unwrap()
}

/// A Saturday inside the booking horizon.
pub fn saturday() -> Date {
    Date::from_calendar_date(2026, Month::June, 20).unwrap()
}

pub fn config() -> BookingConfig {
    BookingConfig::standard().unwrap()
}

/// A configuration whose operating day runs to 22:00, for scenarios that
/// need late windows.
pub fn late_config() -> BookingConfig {
    BookingConfig::new(
        String::from("TB"),
        365,
        vec![120, 240, 360, 480],
        Time::from_hms(8, 0, 0).unwrap(),
        Time::from_hms(22, 0, 0).unwrap(),
        60,
        2_500,
        Duration::from_secs(5),
    )
    .unwrap()
}

pub fn vehicle(id: i64, capacity: u32) -> Resource {
    Resource::vehicle(
        ResourceId::new(id),
        format!("VEH-{id}"),
        VehicleClass::Minibus,
        capacity,
    )
    .unwrap()
}

pub fn driver(id: i64) -> Resource {
    Resource::driver(ResourceId::new(id), format!("DRV-{id}"))
}

/// One 14-seat minibus and one driver.
pub fn single_pair_fleet() -> Vec<Resource> {
    vec![vehicle(1, 14), driver(10)]
}

/// Two 14-seat minibuses and two drivers.
pub fn double_pair_fleet() -> Vec<Resource> {
    vec![vehicle(1, 14), vehicle(2, 14), driver(10), driver(11)]
}

pub fn empty_rules() -> RuleSnapshot {
    RuleSnapshot {
        version: 1,
        availability_rules: Vec::new(),
        pricing_rules: Vec::new(),
        holidays: Vec::new(),
    }
}

pub fn request(date: Date, start: Option<Time>, duration: u32, party: u32) -> BookingRequest {
    BookingRequest::new(date, start, duration, party, None)
}

pub fn at(hour: u8) -> Time {
    Time::from_hms(hour, 0, 0).unwrap()
}

fn placeholder_breakdown() -> PriceBreakdown {
    PriceBreakdown::new(
        Money::from_minor_units(50_000),
        Vec::new(),
        Money::from_minor_units(50_000),
        Money::from_minor_units(50_000),
        2_500,
    )
    .unwrap()
}

/// Builds a confirmed booking occupying a vehicle/driver pair.
pub fn booking_on(
    sequence: u32,
    vehicle_id: i64,
    driver_id: i64,
    date: Date,
    start_hour: u8,
    end_hour: u8,
) -> Booking {
    Booking {
        booking_id: Some(i64::from(sequence)),
        number: BookingNumber::new("TB", 2026, sequence).unwrap(),
        vehicle_id: ResourceId::new(vehicle_id),
        driver_id: ResourceId::new(driver_id),
        window: TimeWindow::new(date, at(start_hour), at(end_hour)).unwrap(),
        party_size: 4,
        breakdown: placeholder_breakdown(),
        status: BookingStatus::Confirmed,
        created_at: String::from("2026-06-01T09:00:00Z"),
        updated_at: String::from("2026-06-01T09:00:00Z"),
    }
}

/// Builds a pricing rule with the given identity and conditions.
pub fn pricing_rule(rule_id: i64, priority: i32, conditions: RuleConditions) -> PricingRule {
    PricingRule {
        rule_id,
        name: format!("rule-{rule_id}"),
        conditions,
        base_price: Money::from_minor_units(50_000),
        per_hour: Money::from_minor_units(10_000),
        per_person: Money::from_minor_units(500),
        multiplier_bp: 10_000,
        min_price: None,
        max_price: None,
        priority,
        active: true,
        valid_from: None,
        valid_until: None,
    }
}
