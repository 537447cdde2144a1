// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timeline event reads.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tour_book_timeline::TimelineEvent;

use crate::data_models::TimelineRow;
use crate::diesel_schema;
use crate::error::PersistenceError;

backend_fn! {
    /// Retrieves the ordered timeline for a booking.
    ///
    /// Events are append-only; ascending event id is creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn timeline_for_booking(
        conn: &mut _,
        booking_id: i64,
    ) -> Result<Vec<TimelineEvent>, PersistenceError> {
        let rows: Vec<TimelineRow> = diesel_schema::booking_timeline::table
            .filter(diesel_schema::booking_timeline::booking_id.eq(booking_id))
            .order(diesel_schema::booking_timeline::event_id.asc())
            .load(conn)?;
        rows.into_iter().map(TimelineRow::into_domain).collect()
    }
}
