// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use crate::{
    AvailabilityRule, DayOfWeek, DurationBucket, Money, PricingRule, ResourceId, ResourceKind,
    RuleConditions, RuleContext, RuleSnapshot, Season,
};
use time::{Date, Month};

fn saturday() -> Date {
    // 2026-06-20 is a Saturday
    Date::from_calendar_date(2026, Month::June, 20).unwrap()
}

fn rule(rule_id: i64, priority: i32, conditions: RuleConditions) -> PricingRule {
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

#[test]
fn test_context_derives_calendar_facts() {
    let context = RuleContext::for_request(saturday(), 360, None, &[saturday()]);
    assert_eq!(context.day_of_week, DayOfWeek::Saturday);
    assert!(context.day_of_week.is_weekend());
    assert!(context.holiday);
    assert_eq!(context.season, Season::High);
}

#[test]
fn test_empty_conditions_match_everything() {
    let context = RuleContext::for_request(saturday(), 360, None, &[]);
    assert!(RuleConditions::default().matches(&context));
}

#[test]
fn test_conditions_are_a_conjunction() {
    let context = RuleContext::for_request(saturday(), 360, None, &[]);
    let conditions = RuleConditions {
        weekend: Some(true),
        holiday: Some(true),
        ..RuleConditions::default()
    };
    // Weekend matches but holiday does not, so the conjunction fails
    assert!(!conditions.matches(&context));
}

#[test]
fn test_day_of_week_outranks_weekend_flag() {
    let weekend_only = RuleConditions {
        weekend: Some(true),
        ..RuleConditions::default()
    };
    let saturday_only = RuleConditions {
        day_of_week: Some(DayOfWeek::Saturday),
        ..RuleConditions::default()
    };
    assert!(saturday_only.specificity() > weekend_only.specificity());
}

#[test]
fn test_duration_buckets() {
    assert_eq!(DurationBucket::for_minutes(120), DurationBucket::Short);
    assert_eq!(DurationBucket::for_minutes(240), DurationBucket::HalfDay);
    assert_eq!(DurationBucket::for_minutes(360), DurationBucket::FullDay);
    assert_eq!(DurationBucket::for_minutes(720), DurationBucket::Extended);
}

#[test]
fn test_validity_window_is_inclusive() {
    let mut bounded = rule(1, 10, RuleConditions::default());
    bounded.valid_from = Some(Date::from_calendar_date(2026, Month::June, 20).unwrap());
    bounded.valid_until = Some(Date::from_calendar_date(2026, Month::June, 30).unwrap());
    assert!(bounded.valid_on(saturday()));
    assert!(!bounded.valid_on(Date::from_calendar_date(2026, Month::June, 19).unwrap()));
    assert!(bounded.valid_on(Date::from_calendar_date(2026, Month::June, 30).unwrap()));
}

#[test]
fn test_rule_validation_rejects_inverted_bounds() {
    let mut broken = rule(7, 10, RuleConditions::default());
    broken.min_price = Some(Money::from_minor_units(100_000));
    broken.max_price = Some(Money::from_minor_units(50_000));
    assert!(broken.validate().is_err());
}

#[test]
fn test_rule_validation_rejects_zero_multiplier() {
    let mut broken = rule(8, 10, RuleConditions::default());
    broken.multiplier_bp = 0;
    assert!(broken.validate().is_err());
}

#[test]
fn test_buffer_is_the_maximum_of_all_buffer_rules() {
    let snapshot = RuleSnapshot {
        version: 1,
        availability_rules: vec![
            AvailabilityRule::Buffer { minutes: 30 },
            AvailabilityRule::Buffer { minutes: 60 },
        ],
        pricing_rules: Vec::new(),
        holidays: Vec::new(),
    };
    assert_eq!(snapshot.buffer_minutes(), 60);
}

#[test]
fn test_capacity_limit_is_the_strictest() {
    let snapshot = RuleSnapshot {
        version: 1,
        availability_rules: vec![
            AvailabilityRule::Capacity {
                resource_kind: ResourceKind::Vehicle,
                max_per_day: 5,
            },
            AvailabilityRule::Capacity {
                resource_kind: ResourceKind::Vehicle,
                max_per_day: 3,
            },
        ],
        pricing_rules: Vec::new(),
        holidays: Vec::new(),
    };
    assert_eq!(snapshot.capacity_limit(ResourceKind::Vehicle), Some(3));
    assert_eq!(snapshot.capacity_limit(ResourceKind::Driver), None);
}

#[test]
fn test_fleet_wide_blackout_covers_every_resource() {
    let snapshot = RuleSnapshot {
        version: 1,
        availability_rules: vec![AvailabilityRule::Blackout {
            from: Date::from_calendar_date(2026, Month::June, 19).unwrap(),
            until: Date::from_calendar_date(2026, Month::June, 21).unwrap(),
            resource_id: None,
            reason: String::from("Fleet inspection"),
        }],
        pricing_rules: Vec::new(),
        holidays: Vec::new(),
    };
    assert_eq!(
        snapshot.blackout_reason(ResourceId::new(1), saturday()),
        Some("Fleet inspection")
    );
    assert_eq!(
        snapshot.blackout_reason(
            ResourceId::new(1),
            Date::from_calendar_date(2026, Month::June, 22).unwrap()
        ),
        None
    );
}

#[test]
fn test_scoped_blackout_covers_only_its_resource() {
    let snapshot = RuleSnapshot {
        version: 1,
        availability_rules: vec![AvailabilityRule::Blackout {
            from: saturday(),
            until: saturday(),
            resource_id: Some(ResourceId::new(4)),
            reason: String::from("Scheduled maintenance"),
        }],
        pricing_rules: Vec::new(),
        holidays: Vec::new(),
    };
    assert!(snapshot.blackout_reason(ResourceId::new(4), saturday()).is_some());
    assert!(snapshot.blackout_reason(ResourceId::new(5), saturday()).is_none());
}

#[test]
fn test_snapshot_deserialization_rejects_unknown_condition_kinds() {
    let raw = r#"{
        "version": 1,
        "availability_rules": [{"surge": {"factor": 2}}],
        "pricing_rules": [],
        "holidays": []
    }"#;
    let result: Result<RuleSnapshot, _> = serde_json::from_str(raw);
    assert!(result.is_err());
}

#[test]
fn test_snapshot_deserialization_rejects_unknown_pricing_fields() {
    let raw = r#"{
        "version": 1,
        "availability_rules": [],
        "pricing_rules": [{
            "rule_id": 1,
            "name": "base",
            "conditions": {"moon_phase": "full"},
            "base_price": 50000,
            "multiplier_bp": 10000,
            "priority": 1,
            "active": true
        }],
        "holidays": []
    }"#;
    let result: Result<RuleSnapshot, _> = serde_json::from_str(raw);
    assert!(result.is_err());
}

#[test]
fn test_snapshot_deserializes_iso_dates() {
    let raw = r#"{
        "version": 3,
        "availability_rules": [
            {"blackout": {"from": "2026-06-19", "until": "2026-06-21", "reason": "Inspection"}},
            {"buffer": {"minutes": 45}}
        ],
        "pricing_rules": [],
        "holidays": ["2026-07-04"]
    }"#;
    let snapshot: RuleSnapshot = serde_json::from_str(raw).unwrap();
    assert_eq!(snapshot.version, 3);
    assert_eq!(snapshot.buffer_minutes(), 45);
    assert!(snapshot.is_holiday(Date::from_calendar_date(2026, Month::July, 4).unwrap()));
}
