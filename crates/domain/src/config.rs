// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::time_window::minute_of;
use std::time::Duration;
use time::Time;

/// Operational booking parameters.
///
/// An explicit value passed into engine and coordinator calls; there is no
/// process-wide mutable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    /// Booking number prefix (uppercase ASCII letters).
    number_prefix: String,
    /// Maximum advance-booking window in days.
    horizon_days: u16,
    /// The allowed booking durations in minutes.
    allowed_durations: Vec<u32>,
    /// Start of the operating day.
    day_open: Time,
    /// End of the operating day.
    day_close: Time,
    /// Granularity of offered start slots in minutes.
    slot_granularity_minutes: u32,
    /// Deposit share of the total in basis points (2 500 = 25%).
    deposit_basis_points: u32,
    /// Deadline covering the commit's locking through persisting phases.
    commit_timeout: Duration,
}

impl BookingConfig {
    /// Creates a new `BookingConfig`.
    ///
    /// # Arguments
    ///
    /// * `number_prefix` - Booking number prefix (uppercase ASCII letters)
    /// * `horizon_days` - Maximum advance-booking window in days
    /// * `allowed_durations` - Allowed booking durations in minutes
    /// * `day_open` - Start of the operating day
    /// * `day_close` - End of the operating day (strictly after `day_open`)
    /// * `slot_granularity_minutes` - Granularity of offered start slots
    /// * `deposit_basis_points` - Deposit share of the total (at most 10 000)
    /// * `commit_timeout` - Deadline for the commit's locking through
    ///   persisting phases
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfig` if any parameter is
    /// inconsistent: empty or non-uppercase prefix, zero horizon, no
    /// allowed durations, a duration longer than the operating day, an
    /// inverted operating day, zero granularity, or a deposit share above
    /// 100%.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        number_prefix: String,
        horizon_days: u16,
        allowed_durations: Vec<u32>,
        day_open: Time,
        day_close: Time,
        slot_granularity_minutes: u32,
        deposit_basis_points: u32,
        commit_timeout: Duration,
    ) -> Result<Self, DomainError> {
        if number_prefix.is_empty() || !number_prefix.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::InvalidConfig {
                reason: String::from("Number prefix must be non-empty uppercase ASCII letters"),
            });
        }
        if horizon_days == 0 {
            return Err(DomainError::InvalidConfig {
                reason: String::from("Booking horizon must be at least one day"),
            });
        }
        if day_close <= day_open {
            return Err(DomainError::InvalidConfig {
                reason: format!("Operating day close {day_close} must be after open {day_open}"),
            });
        }
        let operating_minutes = u32::from(minute_of(day_close) - minute_of(day_open));
        if allowed_durations.is_empty() {
            return Err(DomainError::InvalidConfig {
                reason: String::from("At least one allowed duration is required"),
            });
        }
        for duration in &allowed_durations {
            if *duration == 0 || *duration > operating_minutes {
                return Err(DomainError::InvalidConfig {
                    reason: format!(
                        "Allowed duration {duration} minutes does not fit the {operating_minutes}-minute operating day"
                    ),
                });
            }
        }
        if slot_granularity_minutes == 0 {
            return Err(DomainError::InvalidConfig {
                reason: String::from("Slot granularity must be at least one minute"),
            });
        }
        if deposit_basis_points > 10_000 {
            return Err(DomainError::InvalidConfig {
                reason: format!(
                    "Deposit share {deposit_basis_points} basis points exceeds 100%"
                ),
            });
        }
        Ok(Self {
            number_prefix,
            horizon_days,
            allowed_durations,
            day_open,
            day_close,
            slot_granularity_minutes,
            deposit_basis_points,
            commit_timeout,
        })
    }

    /// Creates the standard operating configuration.
    ///
    /// Hourly slots 08:00-20:00, durations of 2/4/6/8 hours, a one-year
    /// horizon, a 25% deposit, and a five-second commit deadline.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in constants are inconsistent.
    pub fn standard() -> Result<Self, DomainError> {
        let day_open = Time::from_hms(8, 0, 0).map_err(|_| DomainError::InvalidConfig {
            reason: String::from("Invalid standard opening time"),
        })?;
        let day_close = Time::from_hms(20, 0, 0).map_err(|_| DomainError::InvalidConfig {
            reason: String::from("Invalid standard closing time"),
        })?;
        Self::new(
            String::from("TB"),
            365,
            vec![120, 240, 360, 480],
            day_open,
            day_close,
            60,
            2_500,
            Duration::from_secs(5),
        )
    }

    /// Returns the booking number prefix.
    #[must_use]
    pub fn number_prefix(&self) -> &str {
        &self.number_prefix
    }

    /// Returns the maximum advance-booking window in days.
    #[must_use]
    pub const fn horizon_days(&self) -> u16 {
        self.horizon_days
    }

    /// Returns the allowed booking durations in minutes.
    #[must_use]
    pub fn allowed_durations(&self) -> &[u32] {
        &self.allowed_durations
    }

    /// Returns whether a duration is one of the allowed durations.
    #[must_use]
    pub fn allows_duration(&self, minutes: u32) -> bool {
        self.allowed_durations.contains(&minutes)
    }

    /// Returns the start of the operating day.
    #[must_use]
    pub const fn day_open(&self) -> Time {
        self.day_open
    }

    /// Returns the end of the operating day.
    #[must_use]
    pub const fn day_close(&self) -> Time {
        self.day_close
    }

    /// Returns the slot granularity in minutes.
    #[must_use]
    pub const fn slot_granularity_minutes(&self) -> u32 {
        self.slot_granularity_minutes
    }

    /// Returns the deposit share of the total in basis points.
    #[must_use]
    pub const fn deposit_basis_points(&self) -> u32 {
        self.deposit_basis_points
    }

    /// Returns the commit-phase deadline.
    #[must_use]
    pub const fn commit_timeout(&self) -> Duration {
        self.commit_timeout
    }
}
