// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::BookingConfig;
use crate::error::DomainError;
use crate::request::BookingRequest;
use time::Date;

/// Validates a booking request against the configured constraints.
///
/// Malformed requests are rejected here and never reach the availability
/// engine.
///
/// # Arguments
///
/// * `request` - The request to validate
/// * `config` - The operational configuration
/// * `today` - The current date, supplied by the caller for determinism
///
/// # Returns
///
/// * `Ok(())` if the request is well-formed
///
/// # Errors
///
/// * `DomainError::InvalidPartySize` for a party size of zero
/// * `DomainError::InvalidDuration` for a duration outside the allowed set
/// * `DomainError::OutOfWindow` for a date in the past or beyond the
///   configured horizon
/// * `DomainError::TimeArithmeticOverflow` if the horizon end cannot be
///   represented
pub fn validate_booking_request(
    request: &BookingRequest,
    config: &BookingConfig,
    today: Date,
) -> Result<(), DomainError> {
    if request.party_size == 0 {
        return Err(DomainError::InvalidPartySize {
            size: request.party_size,
        });
    }
    if !config.allows_duration(request.duration_minutes) {
        return Err(DomainError::InvalidDuration {
            minutes: request.duration_minutes,
        });
    }

    let latest = today
        .checked_add(time::Duration::days(i64::from(config.horizon_days())))
        .ok_or_else(|| DomainError::TimeArithmeticOverflow {
            operation: String::from("computing the booking horizon end"),
        })?;
    if request.date < today || request.date > latest {
        return Err(DomainError::OutOfWindow {
            date: request.date,
            earliest: today,
            latest,
        });
    }

    if let Some(start) = request.start {
        if start < config.day_open() || start >= config.day_close() {
            return Err(DomainError::InvalidTimeWindow {
                reason: format!(
                    "Requested start {start} is outside operating hours {}-{}",
                    config.day_open(),
                    config.day_close()
                ),
            });
        }
    }

    Ok(())
}
