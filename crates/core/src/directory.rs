// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contracts of the upstream collaborators.
//!
//! The fleet/roster directory and the rule store are owned by external
//! systems. The core consumes both through these traits and treats them
//! as read-many/write-rarely sources: a snapshot is taken per request and
//! never refreshed mid-computation.

use time::Date;
use tour_book_domain::{AvailabilityRule, PricingRule, Resource, RuleSnapshot};

/// Read-only view of vehicles and drivers.
pub trait ResourceDirectory {
    /// Lists resources operational on the given date.
    ///
    /// The returned snapshot is as-of "now"; the engine does not react to
    /// directory changes mid-computation.
    fn list_active_resources(&self, date: Date) -> Vec<Resource>;
}

/// Read-only view of availability constraints and pricing rules.
pub trait RuleStore {
    /// Lists the availability constraints.
    fn list_availability_rules(&self) -> Vec<AvailabilityRule>;

    /// Lists the pricing rules.
    fn list_pricing_rules(&self) -> Vec<PricingRule>;

    /// Lists the recognized holiday dates.
    fn list_holidays(&self) -> Vec<Date>;

    /// Returns the store's current monotonic version.
    fn version(&self) -> u64;
}

/// Assembles a versioned snapshot from a rule store.
///
/// The snapshot is the unit the engine and evaluator operate on; callers
/// take one per request so rule edits cannot change an evaluation in
/// flight.
pub fn snapshot_rules(store: &dyn RuleStore) -> RuleSnapshot {
    RuleSnapshot {
        version: store.version(),
        availability_rules: store.list_availability_rules(),
        pricing_rules: store.list_pricing_rules(),
        holidays: store.list_holidays(),
    }
}
