// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tour_book_domain::DomainError;

/// Errors that can occur during core evaluation and coordination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain validation rule was violated.
    DomainViolation(DomainError),
    /// Two pricing rules tie on both priority and specificity.
    ///
    /// This is a configuration defect in the rule store; evaluation fails
    /// closed rather than guessing a winner.
    AmbiguousRule {
        /// The first colliding rule.
        rule_a: i64,
        /// The second colliding rule.
        rule_b: i64,
        /// The shared priority.
        priority: i32,
        /// The shared specificity.
        specificity: u32,
    },
    /// No active pricing rule matches the request.
    ///
    /// Also a configuration defect: every bookable combination must be
    /// priced.
    NoMatchingRule {
        /// The target date.
        date: time::Date,
    },
    /// The commit-phase deadline expired while waiting for resource locks.
    LockTimeout {
        /// How long the attempt waited, in milliseconds.
        waited_ms: u64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::AmbiguousRule {
                rule_a,
                rule_b,
                priority,
                specificity,
            } => {
                write!(
                    f,
                    "Pricing rules {rule_a} and {rule_b} tie at priority {priority} and specificity {specificity}"
                )
            }
            Self::NoMatchingRule { date } => {
                write!(f, "No active pricing rule matches a booking on {date}")
            }
            Self::LockTimeout { waited_ms } => {
                write!(f, "Resource lock acquisition timed out after {waited_ms} ms")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
