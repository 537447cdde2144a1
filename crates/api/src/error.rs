// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! These are distinct from domain/core/persistence errors and represent
//! the API contract. Translation is explicit so internal errors are
//! never leaked directly; in particular, rule internals behind an
//! ambiguous-rule failure are an operator-facing concern, never shown to
//! an end customer.

use tour_book::CoreError;
use tour_book_domain::DomainError;
use tour_book_persistence::PersistenceError;

/// API-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided. Rejected before any engine runs.
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The requested date is outside the booking horizon.
    ///
    /// Not retryable without changing the request.
    OutOfWindow {
        /// A human-readable description of the violation.
        message: String,
    },
    /// The slot was lost between query and commit.
    ///
    /// Expected under contention and retryable: the caller should
    /// re-query availability and offer an alternative slot.
    SlotNoLongerAvailable {
        /// Why the slot is gone.
        reason: String,
    },
    /// Two pricing rules collide. A rule store configuration defect;
    /// operator-facing, never shown to an end customer.
    AmbiguousRule {
        /// Which rules collided and on what keys.
        message: String,
    },
    /// The rule store cannot price or constrain this request.
    RuleConfiguration {
        /// A human-readable description of the defect.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Infrastructure failure during commit. The transaction is
    /// guaranteed rolled back before this is returned.
    Persistence {
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns whether the caller may retry the same operation.
    ///
    /// Only slot contention is retryable; everything else requires a
    /// changed request or operator intervention.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SlotNoLongerAvailable { .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::OutOfWindow { message } => write!(f, "Out of booking window: {message}"),
            Self::SlotNoLongerAvailable { reason } => {
                write!(f, "Slot no longer available: {reason}")
            }
            Self::AmbiguousRule { message } => {
                write!(f, "Ambiguous pricing rules: {message}")
            }
            Self::RuleConfiguration { message } => {
                write!(f, "Rule configuration defect: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Persistence { message } => write!(f, "Persistence error: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidPartySize { size } => ApiError::InvalidRequest {
            field: String::from("party_size"),
            message: format!("Invalid party size: {size}. Must be at least 1"),
        },
        DomainError::InvalidDuration { minutes } => ApiError::InvalidRequest {
            field: String::from("duration_minutes"),
            message: format!("{minutes} minutes is not an allowed booking duration"),
        },
        DomainError::OutOfWindow {
            date,
            earliest,
            latest,
        } => ApiError::OutOfWindow {
            message: format!("Date {date} must be between {earliest} and {latest}"),
        },
        DomainError::InvalidTimeWindow { reason } => ApiError::InvalidRequest {
            field: String::from("start"),
            message: reason,
        },
        DomainError::InvalidVehicleClass(value) => ApiError::InvalidRequest {
            field: String::from("vehicle_class"),
            message: format!("Unknown vehicle class: '{value}'"),
        },
        DomainError::InvalidBookingNumber(value) => ApiError::InvalidRequest {
            field: String::from("booking_number"),
            message: format!("Malformed booking number: '{value}'"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidRequest {
            field: String::from("status"),
            message: format!("Unknown booking status: '{value}'"),
        },
        DomainError::InvalidStatusTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("booking_lifecycle"),
            message: format!("Cannot transition a {from} booking to {to}"),
        },
        DomainError::InvalidRuleConfig { rule_id, reason } => ApiError::RuleConfiguration {
            message: format!("Rule {rule_id}: {reason}"),
        },
        DomainError::InvalidSeason(value) => ApiError::InvalidRequest {
            field: String::from("season"),
            message: format!("Unknown season: '{value}'"),
        },
        DomainError::InvalidDayOfWeek(value) => ApiError::InvalidRequest {
            field: String::from("day_of_week"),
            message: format!("Unknown day of week: '{value}'"),
        },
        DomainError::InvalidResource { reason } => ApiError::Internal {
            message: format!("Resource directory entry is invalid: {reason}"),
        },
        DomainError::InvalidConfig { reason } => ApiError::Internal {
            message: format!("Booking configuration is invalid: {reason}"),
        },
        DomainError::MoneyArithmeticOverflow { operation } => ApiError::Internal {
            message: format!("Monetary arithmetic overflow while {operation}"),
        },
        DomainError::TimeArithmeticOverflow { operation } => ApiError::Internal {
            message: format!("Time arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::AmbiguousRule {
            rule_a,
            rule_b,
            priority,
            specificity,
        } => ApiError::AmbiguousRule {
            message: format!(
                "Rules {rule_a} and {rule_b} tie at priority {priority} and specificity {specificity}"
            ),
        },
        CoreError::NoMatchingRule { date } => ApiError::RuleConfiguration {
            message: format!("No active pricing rule matches a booking on {date}"),
        },
        // The commit-phase deadline covers lock acquisition; exceeding it
        // is reported as a persistence-class failure
        CoreError::LockTimeout { waited_ms } => ApiError::Persistence {
            message: format!("Commit phase deadline exceeded after {waited_ms} ms"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::BookingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {id} does not exist"),
        },
        PersistenceError::BookingNumberNotFound(number) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("No booking carries number '{number}'"),
        },
        PersistenceError::InvalidStatusTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("booking_lifecycle"),
            message: format!("Cannot transition a {from} booking to {to}"),
        },
        other => ApiError::Persistence {
            message: other.to_string(),
        },
    }
}
