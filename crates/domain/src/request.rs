// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::resource::VehicleClass;
use time::{Date, Time};

/// Caller-supplied booking intent.
///
/// Transient input to availability, pricing, and commit calls; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    /// The requested date.
    pub date: Date,
    /// The requested start time, or `None` for "any".
    pub start: Option<Time>,
    /// The requested duration in minutes.
    pub duration_minutes: u32,
    /// The number of passengers.
    pub party_size: u32,
    /// The desired vehicle class, or `None` for "any".
    pub vehicle_class: Option<VehicleClass>,
}

impl BookingRequest {
    /// Creates a new `BookingRequest`.
    ///
    /// # Arguments
    ///
    /// * `date` - The requested date
    /// * `start` - The requested start time, or `None` for "any"
    /// * `duration_minutes` - The requested duration
    /// * `party_size` - The number of passengers
    /// * `vehicle_class` - The desired vehicle class, or `None` for "any"
    #[must_use]
    pub const fn new(
        date: Date,
        start: Option<Time>,
        duration_minutes: u32,
        party_size: u32,
        vehicle_class: Option<VehicleClass>,
    ) -> Self {
        Self {
            date,
            start,
            duration_minutes,
            party_size,
            vehicle_class,
        }
    }
}
