// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking::BookingStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A resource definition is inconsistent.
    InvalidResource {
        /// Description of the inconsistency.
        reason: String,
    },
    /// A time window is inconsistent (end not after start, zero length, etc.).
    InvalidTimeWindow {
        /// Description of the inconsistency.
        reason: String,
    },
    /// Party size must be at least 1.
    InvalidPartySize {
        /// The invalid party size.
        size: u32,
    },
    /// The requested duration is not one of the configured allowed durations.
    InvalidDuration {
        /// The invalid duration in minutes.
        minutes: u32,
    },
    /// The requested date is outside the configured booking horizon.
    OutOfWindow {
        /// The requested date.
        date: time::Date,
        /// The earliest bookable date.
        earliest: time::Date,
        /// The latest bookable date.
        latest: time::Date,
    },
    /// A booking number string does not match `PREFIX-YYYY-NNNNN`.
    InvalidBookingNumber(String),
    /// A booking status string is not recognized.
    InvalidStatus(String),
    /// A status transition is not permitted by the booking lifecycle.
    InvalidStatusTransition {
        /// The current status.
        from: BookingStatus,
        /// The requested status.
        to: BookingStatus,
    },
    /// A vehicle class string is not recognized.
    InvalidVehicleClass(String),
    /// A season string is not recognized.
    InvalidSeason(String),
    /// A day-of-week string is not recognized.
    InvalidDayOfWeek(String),
    /// A pricing or availability rule is internally inconsistent.
    InvalidRuleConfig {
        /// The offending rule identifier.
        rule_id: i64,
        /// Description of the inconsistency.
        reason: String,
    },
    /// The booking configuration is inconsistent.
    InvalidConfig {
        /// Description of the inconsistency.
        reason: String,
    },
    /// Monetary arithmetic overflowed the fixed-point range.
    MoneyArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Time arithmetic overflowed or produced an unrepresentable value.
    TimeArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidResource { reason } => write!(f, "Invalid resource: {reason}"),
            Self::InvalidTimeWindow { reason } => write!(f, "Invalid time window: {reason}"),
            Self::InvalidPartySize { size } => {
                write!(f, "Invalid party size: {size}. Must be at least 1")
            }
            Self::InvalidDuration { minutes } => {
                write!(
                    f,
                    "Invalid duration: {minutes} minutes is not an allowed booking duration"
                )
            }
            Self::OutOfWindow {
                date,
                earliest,
                latest,
            } => {
                write!(
                    f,
                    "Date {date} is outside the booking horizon ({earliest} through {latest})"
                )
            }
            Self::InvalidBookingNumber(value) => {
                write!(f, "Invalid booking number: '{value}'")
            }
            Self::InvalidStatus(value) => write!(f, "Invalid booking status: '{value}'"),
            Self::InvalidStatusTransition { from, to } => {
                write!(
                    f,
                    "Booking status cannot transition from {} to {}",
                    from.as_str(),
                    to.as_str()
                )
            }
            Self::InvalidVehicleClass(value) => {
                write!(f, "Invalid vehicle class: '{value}'")
            }
            Self::InvalidSeason(value) => write!(f, "Invalid season: '{value}'"),
            Self::InvalidDayOfWeek(value) => write!(f, "Invalid day of week: '{value}'"),
            Self::InvalidRuleConfig { rule_id, reason } => {
                write!(f, "Invalid rule configuration (rule {rule_id}): {reason}")
            }
            Self::InvalidConfig { reason } => {
                write!(f, "Invalid booking configuration: {reason}")
            }
            Self::MoneyArithmeticOverflow { operation } => {
                write!(f, "Monetary arithmetic overflow while {operation}")
            }
            Self::TimeArithmeticOverflow { operation } => {
                write!(f, "Time arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
