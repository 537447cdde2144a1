// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

mod concurrency_tests;
mod fixture_tests;
mod flow_tests;

use crate::fixtures::{StaticResourceDirectory, StaticRuleStore};
use std::sync::{Arc, Mutex};
use time::{Date, OffsetDateTime};
use tour_book::ResourceLockRegistry;
use tour_book_domain::{
    BookingConfig, Money, PricingRule, Resource, ResourceId, RuleConditions, RuleSnapshot,
    VehicleClass,
};
use tour_book_persistence::Persistence;
use tour_book_timeline::{Actor, Cause};

/// Everything a handler call needs, shared the way the server shares it.
pub struct TestEnv {
    pub persistence: Arc<Mutex<Persistence>>,
    pub locks: Arc<ResourceLockRegistry>,
    pub directory: Arc<StaticResourceDirectory>,
    pub rules: Arc<StaticRuleStore>,
    pub config: Arc<BookingConfig>,
}

pub fn test_actor() -> Actor {
    Actor::new(String::from("op-1"), String::from("operator"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test booking"))
}

/// A date safely inside the booking horizon, as the handlers see it.
pub fn future_date() -> Date {
    OffsetDateTime::now_utc()
        .date()
        .checked_add(time::Duration::days(30))
        .unwrap()
}

pub fn future_date_string() -> String {
    future_date().to_string()
}

fn base_pricing_rule() -> PricingRule {
    PricingRule {
        rule_id: 1,
        name: String::from("standard"),
        conditions: RuleConditions::default(),
        base_price: Money::from_minor_units(50_000),
        per_hour: Money::from_minor_units(10_000),
        per_person: Money::from_minor_units(500),
        multiplier_bp: 10_000,
        min_price: None,
        max_price: None,
        priority: 10,
        active: true,
        valid_from: None,
        valid_until: None,
    }
}

fn env_with(resources: Vec<Resource>, snapshot: RuleSnapshot) -> TestEnv {
    TestEnv {
        persistence: Arc::new(Mutex::new(Persistence::new_in_memory().unwrap())),
        locks: Arc::new(ResourceLockRegistry::new()),
        directory: Arc::new(StaticResourceDirectory::new(resources).unwrap()),
        rules: Arc::new(StaticRuleStore::new(snapshot).unwrap()),
        config: Arc::new(BookingConfig::standard().unwrap()),
    }
}

fn vehicle(id: i64) -> Resource {
    Resource::vehicle(
        ResourceId::new(id),
        format!("VEH-{id}"),
        VehicleClass::Minibus,
        14,
    )
    .unwrap()
}

fn driver(id: i64) -> Resource {
    Resource::driver(ResourceId::new(id), format!("DRV-{id}"))
}

fn base_snapshot() -> RuleSnapshot {
    RuleSnapshot {
        version: 1,
        availability_rules: Vec::new(),
        pricing_rules: vec![base_pricing_rule()],
        holidays: Vec::new(),
    }
}

/// One vehicle, one driver: the maximally contended fleet.
pub fn single_pair_env() -> TestEnv {
    env_with(vec![vehicle(1), driver(10)], base_snapshot())
}

/// Two vehicles, two drivers.
pub fn double_pair_env() -> TestEnv {
    env_with(
        vec![vehicle(1), vehicle(2), driver(10), driver(11)],
        base_snapshot(),
    )
}

/// An environment with a custom rule snapshot over the single pair.
pub fn single_pair_env_with_rules(snapshot: RuleSnapshot) -> TestEnv {
    env_with(vec![vehicle(1), driver(10)], snapshot)
}
