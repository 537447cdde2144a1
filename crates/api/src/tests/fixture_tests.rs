// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::fixtures::{StaticResourceDirectory, StaticRuleStore};
use tour_book::{ResourceDirectory, RuleStore};
use time::{Date, Month};

#[test]
fn test_resource_fixture_round_trips() {
    let raw = r#"[
        {"resource_id": 1, "kind": "vehicle", "name": "VEH-1",
         "vehicle_class": "minibus", "capacity": 14, "active": true},
        {"resource_id": 10, "kind": "driver", "name": "DRV-10", "active": true},
        {"resource_id": 11, "kind": "driver", "name": "DRV-11", "active": false}
    ]"#;
    let directory = StaticResourceDirectory::from_json_str(raw).unwrap();

    let date = Date::from_calendar_date(2026, Month::June, 15).unwrap();
    let active = directory.list_active_resources(date);
    // The out-of-service driver is filtered out
    assert_eq!(active.len(), 2);
}

#[test]
fn test_resource_fixture_rejects_duplicate_ids() {
    let raw = r#"[
        {"resource_id": 1, "kind": "driver", "name": "DRV-A", "active": true},
        {"resource_id": 1, "kind": "driver", "name": "DRV-B", "active": true}
    ]"#;
    assert!(StaticResourceDirectory::from_json_str(raw).is_err());
}

#[test]
fn test_resource_fixture_rejects_unknown_fields() {
    let raw = r#"[
        {"resource_id": 1, "kind": "driver", "name": "DRV-A", "active": true,
         "seat_heating": true}
    ]"#;
    assert!(StaticResourceDirectory::from_json_str(raw).is_err());
}

#[test]
fn test_resource_fixture_rejects_capacityless_vehicles() {
    let raw = r#"[
        {"resource_id": 1, "kind": "vehicle", "name": "VEH-1", "active": true}
    ]"#;
    assert!(StaticResourceDirectory::from_json_str(raw).is_err());
}

#[test]
fn test_rule_store_fixture_round_trips() {
    let raw = r#"{
        "version": 4,
        "availability_rules": [
            {"buffer": {"minutes": 60}},
            {"capacity": {"resource_kind": "vehicle", "max_per_day": 6}},
            {"blackout": {"from": "2026-12-24", "until": "2026-12-26",
                          "reason": "Holiday closure"}}
        ],
        "pricing_rules": [{
            "rule_id": 1,
            "name": "standard",
            "base_price": 50000,
            "per_hour": 10000,
            "per_person": 500,
            "multiplier_bp": 10000,
            "priority": 10,
            "active": true
        }],
        "holidays": ["2026-12-25"]
    }"#;
    let store = StaticRuleStore::from_json_str(raw).unwrap();

    assert_eq!(store.version(), 4);
    assert_eq!(store.list_availability_rules().len(), 3);
    assert_eq!(store.list_pricing_rules().len(), 1);
    assert_eq!(
        store.list_holidays(),
        vec![Date::from_calendar_date(2026, Month::December, 25).unwrap()]
    );
}

#[test]
fn test_rule_store_fixture_rejects_unknown_rule_kinds() {
    let raw = r#"{
        "version": 1,
        "availability_rules": [{"surge_window": {"factor": 2}}],
        "pricing_rules": []
    }"#;
    assert!(StaticRuleStore::from_json_str(raw).is_err());
}

#[test]
fn test_rule_store_fixture_rejects_inconsistent_rules() {
    // min above max must fail at load time, not at quote time
    let raw = r#"{
        "version": 1,
        "availability_rules": [],
        "pricing_rules": [{
            "rule_id": 9,
            "name": "broken",
            "base_price": 50000,
            "multiplier_bp": 10000,
            "min_price": 90000,
            "max_price": 10000,
            "priority": 1,
            "active": true
        }]
    }"#;
    assert!(StaticRuleStore::from_json_str(raw).is_err());
}
