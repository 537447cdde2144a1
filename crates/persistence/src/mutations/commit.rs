// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The atomic booking commit.
//!
//! One Diesel transaction produces the booking row, its resource
//! assignment, the year-sequence allocation, and the creation timeline
//! event - or none of them. The sequence increment lives inside the same
//! transaction as the booking insert, so an aborted commit abandons its
//! number and committed numbers stay gap-free within a year.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::ToPrimitive;
use tracing::{debug, info};
use tour_book_domain::{Booking, BookingNumber, BookingStatus};
use tour_book_timeline::{Actor, Cause};

use crate::backend::PersistenceBackend;
use crate::data_models::BookingDraft;
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::iso;

backend_fn! {
    /// Commits a booking atomically.
    ///
    /// # Arguments
    ///
    /// * `conn` - The active database connection
    /// * `draft` - The pre-insert booking shape (resources, window, price)
    /// * `actor` - The actor committing the booking
    /// * `cause` - The reason the booking was committed
    ///
    /// # Returns
    ///
    /// The persisted booking in `held` status, carrying its assigned
    /// sequential number.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; the transaction is rolled
    /// back and no partial records remain.
    pub fn commit_booking(
        conn: &mut _,
        draft: &BookingDraft,
        actor: &Actor,
        cause: &Cause,
    ) -> Result<Booking, PersistenceError> {
        conn.transaction(|conn| -> Result<Booking, PersistenceError> {
            let year: i32 = draft.window.date.year();

            // Allocate the next sequence value for the year. The increment is
            // part of this transaction: an abort abandons the value before it
            // ever becomes visible, so committed numbers have no gaps.
            let updated: usize = diesel::update(
                diesel_schema::booking_sequences::table
                    .filter(diesel_schema::booking_sequences::booking_year.eq(year)),
            )
            .set(
                diesel_schema::booking_sequences::next_value
                    .eq(diesel_schema::booking_sequences::next_value + 1),
            )
            .execute(conn)?;

            let sequence_value: i32 = if updated == 0 {
                diesel::insert_into(diesel_schema::booking_sequences::table)
                    .values((
                        diesel_schema::booking_sequences::booking_year.eq(year),
                        diesel_schema::booking_sequences::next_value.eq(2),
                    ))
                    .execute(conn)?;
                1
            } else {
                let next: i32 = diesel_schema::booking_sequences::table
                    .filter(diesel_schema::booking_sequences::booking_year.eq(year))
                    .select(diesel_schema::booking_sequences::next_value)
                    .first(conn)?;
                next - 1
            };

            let sequence: u32 = sequence_value.to_u32().ok_or_else(|| {
                PersistenceError::InvalidRecord(format!("sequence value {sequence_value}"))
            })?;
            let number: BookingNumber =
                BookingNumber::new(&draft.number_prefix, year, sequence)?;

            let now: String = iso::now_utc();
            let trip_date: String = iso::format_date(draft.window.date)?;
            let start_time: String = iso::format_time(draft.window.start)?;
            let end_time: String = iso::format_time(draft.window.end)?;
            let party_size: i32 = draft.party_size.to_i32().ok_or_else(|| {
                PersistenceError::InvalidRecord(format!("party size {}", draft.party_size))
            })?;
            let modifiers_json: String = serde_json::to_string(&draft.breakdown.modifiers)?;

            diesel::insert_into(diesel_schema::bookings::table)
                .values((
                    diesel_schema::bookings::booking_number.eq(number.to_string()),
                    diesel_schema::bookings::booking_year.eq(year),
                    diesel_schema::bookings::sequence_value.eq(sequence_value),
                    diesel_schema::bookings::vehicle_id.eq(draft.vehicle_id.value()),
                    diesel_schema::bookings::driver_id.eq(draft.driver_id.value()),
                    diesel_schema::bookings::trip_date.eq(&trip_date),
                    diesel_schema::bookings::start_time.eq(&start_time),
                    diesel_schema::bookings::end_time.eq(&end_time),
                    diesel_schema::bookings::party_size.eq(party_size),
                    diesel_schema::bookings::status.eq(BookingStatus::Held.as_str()),
                    diesel_schema::bookings::base_minor.eq(draft.breakdown.base.minor_units()),
                    diesel_schema::bookings::subtotal_minor
                        .eq(draft.breakdown.subtotal.minor_units()),
                    diesel_schema::bookings::deposit_minor
                        .eq(draft.breakdown.deposit_amount.minor_units()),
                    diesel_schema::bookings::balance_minor
                        .eq(draft.breakdown.balance_amount.minor_units()),
                    diesel_schema::bookings::total_minor
                        .eq(draft.breakdown.total.minor_units()),
                    diesel_schema::bookings::modifiers_json.eq(&modifiers_json),
                    diesel_schema::bookings::created_at.eq(&now),
                    diesel_schema::bookings::updated_at.eq(&now),
                ))
                .execute(conn)?;
            let booking_id: i64 = conn.get_last_insert_rowid()?;
            debug!(booking_id, number = %number, "Inserted booking row");

            diesel::insert_into(diesel_schema::resource_assignments::table)
                .values((
                    diesel_schema::resource_assignments::booking_id.eq(booking_id),
                    diesel_schema::resource_assignments::vehicle_id.eq(draft.vehicle_id.value()),
                    diesel_schema::resource_assignments::driver_id.eq(draft.driver_id.value()),
                    diesel_schema::resource_assignments::assigned_at.eq(&now),
                ))
                .execute(conn)?;
            debug!(booking_id, "Inserted resource assignment");

            diesel::insert_into(diesel_schema::booking_timeline::table)
                .values((
                    diesel_schema::booking_timeline::booking_id.eq(Some(booking_id)),
                    diesel_schema::booking_timeline::booking_number.eq(Some(number.to_string())),
                    diesel_schema::booking_timeline::actor_id.eq(&actor.id),
                    diesel_schema::booking_timeline::actor_type.eq(&actor.actor_type),
                    diesel_schema::booking_timeline::cause_id.eq(&cause.id),
                    diesel_schema::booking_timeline::cause_description.eq(&cause.description),
                    diesel_schema::booking_timeline::action_name.eq("CommitBooking"),
                    diesel_schema::booking_timeline::action_details.eq(None::<String>),
                    diesel_schema::booking_timeline::before_status.eq(None::<String>),
                    diesel_schema::booking_timeline::after_status
                        .eq(BookingStatus::Held.as_str()),
                    diesel_schema::booking_timeline::created_at.eq(&now),
                ))
                .execute(conn)?;

            info!(booking_id, number = %number, "Committed booking");

            Ok(Booking {
                booking_id: Some(booking_id),
                number,
                vehicle_id: draft.vehicle_id,
                driver_id: draft.driver_id,
                window: draft.window,
                party_size: draft.party_size,
                breakdown: draft.breakdown.clone(),
                status: BookingStatus::Held,
                created_at: now.clone(),
                updated_at: now,
            })
        })
    }
}
