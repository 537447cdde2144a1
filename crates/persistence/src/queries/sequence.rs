// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking number sequence inspection.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::diesel_schema;
use crate::error::PersistenceError;

backend_fn! {
    /// Returns the highest allocated sequence value for a year.
    ///
    /// `None` means no booking has ever been committed for the year.
    /// Allocation itself happens inside the commit transaction; this
    /// query is diagnostic only.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn current_sequence(
        conn: &mut _,
        booking_year: i32,
    ) -> Result<Option<i32>, PersistenceError> {
        let next: Option<i32> = diesel_schema::booking_sequences::table
            .find(booking_year)
            .select(diesel_schema::booking_sequences::next_value)
            .first(conn)
            .optional()?;
        Ok(next.map(|value| value - 1))
    }
}
