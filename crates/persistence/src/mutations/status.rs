// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle transitions.
//!
//! Every transition is one transaction: the status update, the assignment
//! removal when the booking leaves the active set, and the timeline event
//! land together or not at all. Transition legality is re-checked against
//! the stored status inside the transaction, never trusted from the
//! caller.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};
use tour_book_domain::{Booking, BookingStatus};
use tour_book_timeline::{Actor, Cause};

use crate::data_models::BookingRow;
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::iso;

backend_fn! {
    /// Transitions a booking to a new lifecycle status.
    ///
    /// Releasing or cancelling deletes the booking's resource assignment
    /// in the same transaction, freeing the vehicle and driver
    /// immediately rather than at end of day.
    ///
    /// # Arguments
    ///
    /// * `conn` - The active database connection
    /// * `booking_id` - The booking to transition
    /// * `new_status` - The requested status
    /// * `action_name` - The timeline action name (e.g., "`ReleaseBooking`")
    /// * `actor` - The actor performing the transition
    /// * `cause` - The reason for the transition
    ///
    /// # Returns
    ///
    /// The booking with its updated status.
    ///
    /// # Errors
    ///
    /// * `PersistenceError::BookingNotFound` if the booking does not exist
    /// * `PersistenceError::InvalidStatusTransition` if the lifecycle
    ///   forbids the transition
    pub fn transition_booking_status(
        conn: &mut _,
        booking_id: i64,
        new_status: BookingStatus,
        action_name: &str,
        actor: &Actor,
        cause: &Cause,
    ) -> Result<Booking, PersistenceError> {
        conn.transaction(|conn| -> Result<Booking, PersistenceError> {
            let row: BookingRow = diesel_schema::bookings::table
                .find(booking_id)
                .first(conn)
                .optional()?
                .ok_or(PersistenceError::BookingNotFound(booking_id))?;
            let mut booking: Booking = row.into_domain()?;

            if !booking.status.can_transition_to(new_status) {
                return Err(PersistenceError::InvalidStatusTransition {
                    from: booking.status.as_str().to_string(),
                    to: new_status.as_str().to_string(),
                });
            }

            let now: String = iso::now_utc();
            diesel::update(diesel_schema::bookings::table.find(booking_id))
                .set((
                    diesel_schema::bookings::status.eq(new_status.as_str()),
                    diesel_schema::bookings::updated_at.eq(&now),
                ))
                .execute(conn)?;

            if !new_status.keeps_assignment() {
                let removed: usize = diesel::delete(
                    diesel_schema::resource_assignments::table
                        .filter(diesel_schema::resource_assignments::booking_id.eq(booking_id)),
                )
                .execute(conn)?;
                debug!(booking_id, removed, "Removed resource assignment");
            }

            diesel::insert_into(diesel_schema::booking_timeline::table)
                .values((
                    diesel_schema::booking_timeline::booking_id.eq(Some(booking_id)),
                    diesel_schema::booking_timeline::booking_number
                        .eq(Some(booking.number.to_string())),
                    diesel_schema::booking_timeline::actor_id.eq(&actor.id),
                    diesel_schema::booking_timeline::actor_type.eq(&actor.actor_type),
                    diesel_schema::booking_timeline::cause_id.eq(&cause.id),
                    diesel_schema::booking_timeline::cause_description.eq(&cause.description),
                    diesel_schema::booking_timeline::action_name.eq(action_name),
                    diesel_schema::booking_timeline::action_details.eq(None::<String>),
                    diesel_schema::booking_timeline::before_status
                        .eq(Some(booking.status.as_str())),
                    diesel_schema::booking_timeline::after_status.eq(new_status.as_str()),
                    diesel_schema::booking_timeline::created_at.eq(&now),
                ))
                .execute(conn)?;

            info!(
                booking_id,
                from = booking.status.as_str(),
                to = new_status.as_str(),
                "Transitioned booking status"
            );

            booking.status = new_status;
            booking.updated_at = now;
            Ok(booking)
        })
    }
}
