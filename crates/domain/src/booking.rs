// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::PriceBreakdown;
use crate::resource::ResourceId;
use crate::time_window::TimeWindow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The lifecycle state of a booking.
///
/// Explicit lifecycle states govern what operations are permitted. A
/// booking is created `Held` inside the commit transaction and is
/// immutable after confirmation except for status transitions; changing
/// its window or resources means releasing it and committing a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Provisionally committed, awaiting finalization (e.g., payment).
    #[default]
    Held,
    /// Finalized and contractually binding.
    Confirmed,
    /// The trip has taken place.
    Completed,
    /// Released or administratively cancelled. Terminal.
    Cancelled,
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "held" => Ok(Self::Held),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BookingStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Held => "held",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Held → Confirmed
    /// - Held → Cancelled (release)
    /// - Confirmed → Completed
    /// - Confirmed → Cancelled (administrative cancellation)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Held, Self::Confirmed)
                | (Self::Held | Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }

    /// Returns whether a booking in this status occupies its resources.
    ///
    /// Every status except `Cancelled` counts toward conflicts and
    /// capacity ceilings.
    #[must_use]
    pub const fn occupies_resources(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Returns whether an assignment row should exist for this status.
    ///
    /// Assignments exist only while a booking is held or confirmed; they
    /// are removed on cancellation so the resources free immediately.
    #[must_use]
    pub const fn keeps_assignment(&self) -> bool {
        matches!(self, Self::Held | Self::Confirmed)
    }
}

/// A human-readable, sequential booking number: `PREFIX-YYYY-NNNNN`.
///
/// Numbers are monotonically increasing within a year with no gaps among
/// committed bookings. This format appears on customer-facing
/// confirmations and is never regenerated for an existing booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookingNumber {
    prefix: String,
    year: i32,
    sequence: u32,
}

impl BookingNumber {
    /// Creates a new `BookingNumber`.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The configured prefix (uppercase ASCII letters)
    /// * `year` - The booking year
    /// * `sequence` - The 1-based sequence value within the year
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is empty or not uppercase ASCII
    /// letters, or the sequence is zero.
    pub fn new(prefix: &str, year: i32, sequence: u32) -> Result<Self, DomainError> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::InvalidBookingNumber(format!(
                "{prefix}-{year}-{sequence:05}"
            )));
        }
        if sequence == 0 {
            return Err(DomainError::InvalidBookingNumber(format!(
                "{prefix}-{year}-{sequence:05}"
            )));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            year,
            sequence,
        })
    }

    /// Returns the prefix component.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the year component.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the sequence component.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl std::fmt::Display for BookingNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{:05}", self.prefix, self.year, self.sequence)
    }
}

impl FromStr for BookingNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let prefix = parts
            .next()
            .ok_or_else(|| DomainError::InvalidBookingNumber(s.to_string()))?;
        let year: i32 = parts
            .next()
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| DomainError::InvalidBookingNumber(s.to_string()))?;
        let sequence_part = parts
            .next()
            .ok_or_else(|| DomainError::InvalidBookingNumber(s.to_string()))?;
        if sequence_part.len() != 5 {
            return Err(DomainError::InvalidBookingNumber(s.to_string()));
        }
        let sequence: u32 = sequence_part
            .parse()
            .map_err(|_| DomainError::InvalidBookingNumber(s.to_string()))?;
        Self::new(prefix, year, sequence)
    }
}

impl TryFrom<String> for BookingNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BookingNumber> for String {
    fn from(value: BookingNumber) -> Self {
        value.to_string()
    }
}

/// A committed booking.
///
/// `booking_id` is the canonical internal identifier assigned by the
/// database; `None` indicates the booking has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Canonical internal identifier, assigned on first save.
    pub booking_id: Option<i64>,
    /// The customer-facing sequential number.
    pub number: BookingNumber,
    /// The assigned vehicle.
    pub vehicle_id: ResourceId,
    /// The assigned driver.
    pub driver_id: ResourceId,
    /// The booked window.
    pub window: TimeWindow,
    /// Number of passengers.
    pub party_size: u32,
    /// The contractual price decomposition.
    pub breakdown: PriceBreakdown,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Creation timestamp (ISO 8601, UTC).
    pub created_at: String,
    /// Last update timestamp (ISO 8601, UTC).
    pub updated_at: String,
}

impl Booking {
    /// Returns whether this booking occupies a given resource.
    #[must_use]
    pub fn uses_resource(&self, resource_id: ResourceId) -> bool {
        self.vehicle_id == resource_id || self.driver_id == resource_id
    }
}

/// The join of a booking to its selected vehicle and driver.
///
/// Exists only while the parent booking is held or confirmed; deleted on
/// cancellation so the resources free immediately rather than at end of
/// day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAssignment {
    /// Canonical internal identifier, assigned on first save.
    pub assignment_id: Option<i64>,
    /// The parent booking.
    pub booking_id: i64,
    /// The assigned vehicle.
    pub vehicle_id: ResourceId,
    /// The assigned driver.
    pub driver_id: ResourceId,
    /// Assignment timestamp (ISO 8601, UTC).
    pub assigned_at: String,
}
