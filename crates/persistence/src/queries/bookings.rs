// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking reads.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tour_book_domain::{Booking, BookingStatus, ResourceAssignment};

use crate::data_models::{AssignmentRow, BookingRow};
use crate::diesel_schema;
use crate::error::PersistenceError;

backend_fn! {
    /// Retrieves the bookings occupying resources on a date.
    ///
    /// Returns every booking on the date in any status except
    /// `cancelled`, ascending by booking id. This is the authoritative
    /// conflict set the coordinator consults under lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn bookings_on_date(
        conn: &mut _,
        trip_date: &str,
    ) -> Result<Vec<Booking>, PersistenceError> {
        let rows: Vec<BookingRow> = diesel_schema::bookings::table
            .filter(diesel_schema::bookings::trip_date.eq(trip_date))
            .filter(diesel_schema::bookings::status.ne(BookingStatus::Cancelled.as_str()))
            .order(diesel_schema::bookings::booking_id.asc())
            .load(conn)?;
        rows.into_iter().map(BookingRow::into_domain).collect()
    }
}

backend_fn! {
    /// Retrieves a booking by its canonical id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BookingNotFound` if no such booking
    /// exists.
    pub fn get_booking(conn: &mut _, booking_id: i64) -> Result<Booking, PersistenceError> {
        let row: BookingRow = diesel_schema::bookings::table
            .find(booking_id)
            .first(conn)
            .optional()?
            .ok_or(PersistenceError::BookingNotFound(booking_id))?;
        row.into_domain()
    }
}

backend_fn! {
    /// Retrieves a booking by its customer-facing number.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BookingNumberNotFound` if no booking
    /// carries the number.
    pub fn get_booking_by_number(
        conn: &mut _,
        booking_number: &str,
    ) -> Result<Booking, PersistenceError> {
        let row: BookingRow = diesel_schema::bookings::table
            .filter(diesel_schema::bookings::booking_number.eq(booking_number))
            .first(conn)
            .optional()?
            .ok_or_else(|| {
                PersistenceError::BookingNumberNotFound(booking_number.to_string())
            })?;
        row.into_domain()
    }
}

backend_fn! {
    /// Lists the booking numbers committed for a year, ascending by
    /// sequence value.
    ///
    /// Cancelled bookings are included: their numbers were committed and
    /// are never reused or renumbered.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn booking_numbers_for_year(
        conn: &mut _,
        booking_year: i32,
    ) -> Result<Vec<String>, PersistenceError> {
        Ok(diesel_schema::bookings::table
            .filter(diesel_schema::bookings::booking_year.eq(booking_year))
            .order(diesel_schema::bookings::sequence_value.asc())
            .select(diesel_schema::bookings::booking_number)
            .load(conn)?)
    }
}

backend_fn! {
    /// Retrieves the resource assignment for a booking, if one exists.
    ///
    /// Assignments exist only while the booking is held or confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn assignment_for_booking(
        conn: &mut _,
        booking_id: i64,
    ) -> Result<Option<ResourceAssignment>, PersistenceError> {
        let row: Option<AssignmentRow> = diesel_schema::resource_assignments::table
            .filter(diesel_schema::resource_assignments::booking_id.eq(booking_id))
            .first(conn)
            .optional()?;
        Ok(row.map(AssignmentRow::into_domain))
    }
}
