// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability constraints and pricing rules.
//!
//! Both rule families are owned by the external rule store; the core only
//! evaluates them. Rules enter the core as a versioned [`RuleSnapshot`]
//! passed by value into every evaluation, never as a process-wide mutable
//! cache, so a rule edit can never change the outcome of an evaluation
//! already in flight.
//!
//! Condition kinds form a closed set. Unknown kinds are rejected when a
//! snapshot is deserialized, never silently ignored.

use crate::error::DomainError;
use crate::money::Money;
use crate::resource::{ResourceId, ResourceKind, VehicleClass};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Month, Weekday};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Serde adapter for lists of ISO 8601 dates.
mod iso_date_vec {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use time::Date;
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;

    const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(dates: &[Date], serializer: S) -> Result<S::Ok, S::Error> {
        let formatted: Vec<String> = dates
            .iter()
            .map(|date| date.format(FORMAT).map_err(serde::ser::Error::custom))
            .collect::<Result<_, _>>()?;
        formatted.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Date>, D::Error> {
        let raw: Vec<String> = Vec::deserialize(deserializer)?;
        raw.iter()
            .map(|value| Date::parse(value, FORMAT).map_err(serde::de::Error::custom))
            .collect()
    }
}

/// Day of the week, as used by pricing rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Converts this day to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Returns whether this day falls on a weekend.
    #[must_use]
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    /// Derives the day of week for a calendar date.
    #[must_use]
    pub const fn for_date(date: Date) -> Self {
        match date.weekday() {
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
            Weekday::Sunday => Self::Sunday,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monday" => Ok(Self::Monday),
            "tuesday" => Ok(Self::Tuesday),
            "wednesday" => Ok(Self::Wednesday),
            "thursday" => Ok(Self::Thursday),
            "friday" => Ok(Self::Friday),
            "saturday" => Ok(Self::Saturday),
            "sunday" => Ok(Self::Sunday),
            _ => Err(DomainError::InvalidDayOfWeek(s.to_string())),
        }
    }
}

/// Commercial season, derived from the calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// November through March, excluding December.
    Low,
    /// April, May, September, October.
    Shoulder,
    /// June through August, plus December.
    High,
}

impl Season {
    /// Derives the season for a calendar date.
    #[must_use]
    pub const fn for_date(date: Date) -> Self {
        match date.month() {
            Month::June | Month::July | Month::August | Month::December => Self::High,
            Month::April | Month::May | Month::September | Month::October => Self::Shoulder,
            Month::January | Month::February | Month::March | Month::November => Self::Low,
        }
    }

    /// Converts this season to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Shoulder => "shoulder",
            Self::High => "high",
        }
    }
}

impl FromStr for Season {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "shoulder" => Ok(Self::Shoulder),
            "high" => Ok(Self::High),
            _ => Err(DomainError::InvalidSeason(s.to_string())),
        }
    }
}

/// Coarse duration classification used by pricing rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    /// Up to 2 hours.
    Short,
    /// Over 2 and up to 5 hours.
    HalfDay,
    /// Over 5 and up to 10 hours.
    FullDay,
    /// Over 10 hours.
    Extended,
}

impl DurationBucket {
    /// Classifies a duration in minutes.
    #[must_use]
    pub const fn for_minutes(minutes: u32) -> Self {
        if minutes <= 120 {
            Self::Short
        } else if minutes <= 300 {
            Self::HalfDay
        } else if minutes <= 600 {
            Self::FullDay
        } else {
            Self::Extended
        }
    }
}

/// An availability constraint from the rule store.
///
/// Constraints are additive: every applicable rule must be satisfied
/// simultaneously for a slot to be feasible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum AvailabilityRule {
    /// A date range during which a resource (or every resource) is
    /// categorically unavailable.
    Blackout {
        /// First blacked-out date, inclusive.
        #[serde(with = "iso_date")]
        from: Date,
        /// Last blacked-out date, inclusive.
        #[serde(with = "iso_date")]
        until: Date,
        /// The affected resource, or `None` for a fleet-wide blackout.
        #[serde(default)]
        resource_id: Option<ResourceId>,
        /// Operator-facing reason.
        reason: String,
    },
    /// Mandatory idle minutes between consecutive bookings on a resource.
    Buffer {
        /// The buffer length in minutes.
        minutes: u32,
    },
    /// Maximum bookings per resource kind per operating day.
    Capacity {
        /// The constrained resource kind.
        resource_kind: ResourceKind,
        /// The per-day ceiling.
        max_per_day: u32,
    },
}

/// The resolved facts about a request that pricing conditions match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    /// The vehicle class the quote is for, if any was requested.
    pub vehicle_class: Option<VehicleClass>,
    /// Booking duration in minutes.
    pub duration_minutes: u32,
    /// Day of week of the target date.
    pub day_of_week: DayOfWeek,
    /// Whether the target date is a listed holiday.
    pub holiday: bool,
    /// Season of the target date.
    pub season: Season,
}

impl RuleContext {
    /// Builds the match context for a request.
    #[must_use]
    pub fn for_request(
        date: Date,
        duration_minutes: u32,
        vehicle_class: Option<VehicleClass>,
        holidays: &[Date],
    ) -> Self {
        Self {
            vehicle_class,
            duration_minutes,
            day_of_week: DayOfWeek::for_date(date),
            holiday: holidays.contains(&date),
            season: Season::for_date(date),
        }
    }
}

/// The condition set of a pricing rule, combined by logical AND.
///
/// A `None` field matches anything. Specificity is the weighted count of
/// set fields; a day-of-week condition pins one day in seven and therefore
/// counts above the coarser weekend flag, so a Saturday-only rule outranks
/// a weekend rule at equal priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RuleConditions {
    /// Required vehicle class.
    pub vehicle_class: Option<VehicleClass>,
    /// Required duration bucket.
    pub duration_bucket: Option<DurationBucket>,
    /// Required day of week.
    pub day_of_week: Option<DayOfWeek>,
    /// Required weekend flag.
    pub weekend: Option<bool>,
    /// Required holiday flag.
    pub holiday: Option<bool>,
    /// Required season.
    pub season: Option<Season>,
}

impl RuleConditions {
    /// Returns whether every set condition matches the context.
    #[must_use]
    pub fn matches(&self, context: &RuleContext) -> bool {
        if let Some(class) = self.vehicle_class {
            if context.vehicle_class != Some(class) {
                return false;
            }
        }
        if let Some(bucket) = self.duration_bucket {
            if DurationBucket::for_minutes(context.duration_minutes) != bucket {
                return false;
            }
        }
        if let Some(day) = self.day_of_week {
            if context.day_of_week != day {
                return false;
            }
        }
        if let Some(weekend) = self.weekend {
            if context.day_of_week.is_weekend() != weekend {
                return false;
            }
        }
        if let Some(holiday) = self.holiday {
            if context.holiday != holiday {
                return false;
            }
        }
        if let Some(season) = self.season {
            if context.season != season {
                return false;
            }
        }
        true
    }

    /// Returns the weighted specificity of this condition set.
    #[must_use]
    pub const fn specificity(&self) -> u32 {
        let mut score: u32 = 0;
        if self.vehicle_class.is_some() {
            score += 1;
        }
        if self.duration_bucket.is_some() {
            score += 1;
        }
        // A single day is strictly narrower than the two-day weekend flag
        if self.day_of_week.is_some() {
            score += 2;
        }
        if self.weekend.is_some() {
            score += 1;
        }
        if self.holiday.is_some() {
            score += 1;
        }
        if self.season.is_some() {
            score += 1;
        }
        score
    }
}

/// A pricing rule from the rule store.
///
/// When multiple rules match a request the numerically highest `priority`
/// wins; ties break to the more specific condition set; a tie on both is a
/// configuration defect and evaluation fails closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingRule {
    /// The rule identifier assigned by the rule store.
    pub rule_id: i64,
    /// Operator-facing rule name.
    pub name: String,
    /// The condition set, combined by logical AND.
    #[serde(default)]
    pub conditions: RuleConditions,
    /// Base price in minor units.
    pub base_price: Money,
    /// Price per hour in minor units.
    #[serde(default)]
    pub per_hour: Money,
    /// Price per passenger in minor units.
    #[serde(default)]
    pub per_person: Money,
    /// Multiplier in basis points (10 000 = x1.0).
    pub multiplier_bp: u32,
    /// Optional price floor in minor units.
    #[serde(default)]
    pub min_price: Option<Money>,
    /// Optional price ceiling in minor units.
    #[serde(default)]
    pub max_price: Option<Money>,
    /// Selection priority; highest wins.
    pub priority: i32,
    /// Whether this rule participates in evaluation.
    pub active: bool,
    /// First date this rule applies, inclusive.
    #[serde(default, with = "iso_date::option")]
    pub valid_from: Option<Date>,
    /// Last date this rule applies, inclusive.
    #[serde(default, with = "iso_date::option")]
    pub valid_until: Option<Date>,
}

impl PricingRule {
    /// Returns whether this rule's validity window contains a date.
    #[must_use]
    pub fn valid_on(&self, date: Date) -> bool {
        if let Some(from) = self.valid_from {
            if date < from {
                return false;
            }
        }
        if let Some(until) = self.valid_until {
            if date > until {
                return false;
            }
        }
        true
    }

    /// Validates the internal consistency of this rule.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRuleConfig` if the multiplier is zero,
    /// the price bounds are inverted, or the validity window is inverted.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.multiplier_bp == 0 {
            return Err(DomainError::InvalidRuleConfig {
                rule_id: self.rule_id,
                reason: String::from("Multiplier must be positive"),
            });
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(DomainError::InvalidRuleConfig {
                    rule_id: self.rule_id,
                    reason: format!("min_price {min} exceeds max_price {max}"),
                });
            }
        }
        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            if from > until {
                return Err(DomainError::InvalidRuleConfig {
                    rule_id: self.rule_id,
                    reason: format!("valid_from {from} is after valid_until {until}"),
                });
            }
        }
        Ok(())
    }
}

/// A versioned, immutable view of the rule store.
///
/// Snapshots are taken once per request and passed into every engine and
/// evaluator call; the core never consults a mutable rule source
/// mid-evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSnapshot {
    /// Monotonic snapshot version from the rule store.
    pub version: u64,
    /// Availability constraints.
    pub availability_rules: Vec<AvailabilityRule>,
    /// Pricing rules.
    pub pricing_rules: Vec<PricingRule>,
    /// Listed holiday dates.
    #[serde(default, with = "iso_date_vec")]
    pub holidays: Vec<Date>,
}

impl RuleSnapshot {
    /// Creates an empty snapshot at version zero.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            version: 0,
            availability_rules: Vec::new(),
            pricing_rules: Vec::new(),
            holidays: Vec::new(),
        }
    }

    /// Validates every pricing rule in this snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first rule-configuration error found.
    pub fn validate(&self) -> Result<(), DomainError> {
        for rule in &self.pricing_rules {
            rule.validate()?;
        }
        for rule in &self.availability_rules {
            if let AvailabilityRule::Blackout { from, until, .. } = rule {
                if from > until {
                    return Err(DomainError::InvalidRuleConfig {
                        rule_id: 0,
                        reason: format!("Blackout range {from}..{until} is inverted"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the effective buffer in minutes.
    ///
    /// Buffer rules are additive constraints; the maximum satisfies all of
    /// them simultaneously.
    #[must_use]
    pub fn buffer_minutes(&self) -> u32 {
        self.availability_rules
            .iter()
            .filter_map(|rule| match rule {
                AvailabilityRule::Buffer { minutes } => Some(*minutes),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Returns the strictest per-day booking ceiling for a resource kind.
    #[must_use]
    pub fn capacity_limit(&self, kind: ResourceKind) -> Option<u32> {
        self.availability_rules
            .iter()
            .filter_map(|rule| match rule {
                AvailabilityRule::Capacity {
                    resource_kind,
                    max_per_day,
                } if *resource_kind == kind => Some(*max_per_day),
                _ => None,
            })
            .min()
    }

    /// Returns the blackout reason covering a resource on a date, if any.
    ///
    /// Fleet-wide blackouts (no resource id) cover every resource.
    #[must_use]
    pub fn blackout_reason(&self, resource_id: ResourceId, date: Date) -> Option<&str> {
        self.availability_rules.iter().find_map(|rule| match rule {
            AvailabilityRule::Blackout {
                from,
                until,
                resource_id: scope,
                reason,
            } if *from <= date
                && date <= *until
                && scope.is_none_or(|scoped| scoped == resource_id) =>
            {
                Some(reason.as_str())
            }
            _ => None,
        })
    }

    /// Returns whether a date is a listed holiday.
    #[must_use]
    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }
}
