// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and pre-insert value objects.
//!
//! Row structs mirror the table column order exactly; conversions back to
//! domain values live here so queries and mutations stay thin.

use crate::error::PersistenceError;
use crate::iso;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use tour_book_domain::{
    Booking, BookingNumber, BookingStatus, Money, PriceBreakdown, PriceModifier,
    ResourceAssignment, ResourceId, TimeWindow,
};
use tour_book_timeline::{Action, Actor, Cause, TimelineEvent};

/// The pre-insert shape of a booking.
///
/// The coordinator supplies everything except the booking id and the
/// sequential number; both are produced inside the commit transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    /// The configured booking number prefix.
    pub number_prefix: String,
    /// The assigned vehicle.
    pub vehicle_id: ResourceId,
    /// The assigned driver.
    pub driver_id: ResourceId,
    /// The booked window.
    pub window: TimeWindow,
    /// Number of passengers.
    pub party_size: u32,
    /// The authoritative price decomposition.
    pub breakdown: PriceBreakdown,
}

/// A `bookings` row.
#[derive(Debug, Clone, Queryable)]
pub struct BookingRow {
    pub booking_id: i64,
    pub booking_number: String,
    pub booking_year: i32,
    pub sequence_value: i32,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub trip_date: String,
    pub start_time: String,
    pub end_time: String,
    pub party_size: i32,
    pub status: String,
    pub base_minor: i64,
    pub subtotal_minor: i64,
    pub deposit_minor: i64,
    pub balance_minor: i64,
    pub total_minor: i64,
    pub modifiers_json: String,
    pub created_at: String,
    pub updated_at: String,
}

impl BookingRow {
    /// Converts this row back to a domain booking.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidRecord` if any stored field fails
    /// domain validation.
    pub fn into_domain(self) -> Result<Booking, PersistenceError> {
        let number: BookingNumber = self.booking_number.parse()?;
        let status: BookingStatus = self.status.parse()?;
        let window = TimeWindow::new(
            iso::parse_date(&self.trip_date)?,
            iso::parse_time(&self.start_time)?,
            iso::parse_time(&self.end_time)?,
        )?;
        let party_size = self.party_size.to_u32().ok_or_else(|| {
            PersistenceError::InvalidRecord(format!("party size {}", self.party_size))
        })?;
        let modifiers: Vec<PriceModifier> = serde_json::from_str(&self.modifiers_json)?;
        let breakdown = PriceBreakdown {
            base: Money::from_minor_units(self.base_minor),
            modifiers,
            subtotal: Money::from_minor_units(self.subtotal_minor),
            deposit_amount: Money::from_minor_units(self.deposit_minor),
            balance_amount: Money::from_minor_units(self.balance_minor),
            total: Money::from_minor_units(self.total_minor),
        };
        Ok(Booking {
            booking_id: Some(self.booking_id),
            number,
            vehicle_id: ResourceId::new(self.vehicle_id),
            driver_id: ResourceId::new(self.driver_id),
            window,
            party_size,
            breakdown,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A `resource_assignments` row.
#[derive(Debug, Clone, Queryable)]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub booking_id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub assigned_at: String,
}

impl AssignmentRow {
    /// Converts this row back to a domain assignment.
    #[must_use]
    pub fn into_domain(self) -> ResourceAssignment {
        ResourceAssignment {
            assignment_id: Some(self.assignment_id),
            booking_id: self.booking_id,
            vehicle_id: ResourceId::new(self.vehicle_id),
            driver_id: ResourceId::new(self.driver_id),
            assigned_at: self.assigned_at,
        }
    }
}

/// A `booking_timeline` row.
#[derive(Debug, Clone, Queryable)]
pub struct TimelineRow {
    pub event_id: i64,
    pub booking_id: Option<i64>,
    pub booking_number: Option<String>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before_status: Option<String>,
    pub after_status: String,
    pub created_at: String,
}

impl TimelineRow {
    /// Converts this row back to a timeline event.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidRecord` if a stored status is not
    /// recognized.
    pub fn into_domain(self) -> Result<TimelineEvent, PersistenceError> {
        let before: Option<BookingStatus> = match self.before_status {
            Some(value) => Some(value.parse()?),
            None => None,
        };
        let after: BookingStatus = self.after_status.parse()?;
        Ok(TimelineEvent {
            event_id: Some(self.event_id),
            actor: Actor::new(self.actor_id, self.actor_type),
            cause: Cause::new(self.cause_id, self.cause_description),
            action: Action::new(self.action_name, self.action_details),
            before,
            after,
        })
    }
}
