// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod fixtures;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use fixtures::{FixtureError, StaticResourceDirectory, StaticRuleStore};
pub use handlers::{
    cancel_booking, check_availability, commit_booking, complete_booking, confirm_booking,
    get_booking, get_booking_by_number, get_booking_timeline, quote_price, release_booking,
};
pub use request_response::{
    BookingActionResponse, BookingInfo, CheckAvailabilityRequest, CheckAvailabilityResponse,
    CommitBookingRequest, CommitBookingResponse, GetTimelineResponse, PriceBreakdownInfo,
    PriceModifierInfo, QuotePriceRequest, QuotePriceResponse, TimelineEventInfo,
};
