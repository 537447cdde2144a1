// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs.
//!
//! These are distinct from domain types and represent the API contract.
//! Dates are `YYYY-MM-DD` strings, times are `HH:MM:SS`, and money is
//! integer minor units.

use serde::{Deserialize, Serialize};
use tour_book::{AvailabilityResult, SuggestedPair};
use tour_book_domain::{Booking, PriceBreakdown};
use tour_book_timeline::TimelineEvent;

use crate::handlers::format_time_string;

/// Request to check availability for a date/duration/party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAvailabilityRequest {
    /// The requested date (`YYYY-MM-DD`).
    pub date: String,
    /// The requested start time (`HH:MM:SS`), or `None` for "any".
    #[serde(default)]
    pub start: Option<String>,
    /// The requested duration in minutes.
    pub duration_minutes: u32,
    /// The number of passengers.
    pub party_size: u32,
    /// The desired vehicle class, or `None` for "any".
    #[serde(default)]
    pub vehicle_class: Option<String>,
}

/// Response for an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAvailabilityResponse {
    /// Whether at least one feasible slot exists.
    pub available: bool,
    /// Feasible start times (`HH:MM:SS`), ascending.
    pub slots: Vec<String>,
    /// Advisory vehicle for the earliest slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_vehicle_id: Option<i64>,
    /// Advisory driver for the earliest slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_driver_id: Option<i64>,
    /// The slot the suggestion applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_start: Option<String>,
    /// Why nothing is available, when `available` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_reason: Option<String>,
    /// The rule snapshot version the result was computed against.
    pub snapshot_version: u64,
}

impl CheckAvailabilityResponse {
    /// Builds the response from an engine result.
    #[must_use]
    pub fn from_result(result: &AvailabilityResult) -> Self {
        let suggestion: Option<&SuggestedPair> = result.suggestion.as_ref();
        Self {
            available: result.available,
            slots: result.slots.iter().map(|slot| format_time_string(*slot)).collect(),
            suggested_vehicle_id: suggestion.map(|pair| pair.vehicle_id.value()),
            suggested_driver_id: suggestion.map(|pair| pair.driver_id.value()),
            suggested_start: suggestion.map(|pair| format_time_string(pair.start)),
            blocking_reason: result
                .blocking_reason
                .as_ref()
                .map(std::string::ToString::to_string),
            snapshot_version: result.snapshot_version,
        }
    }
}

/// Request to quote a price. Same shape as an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePriceRequest {
    /// The requested date (`YYYY-MM-DD`).
    pub date: String,
    /// The requested duration in minutes.
    pub duration_minutes: u32,
    /// The number of passengers.
    pub party_size: u32,
    /// The desired vehicle class, or `None` for "any".
    #[serde(default)]
    pub vehicle_class: Option<String>,
}

/// One named price adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceModifierInfo {
    /// Modifier name.
    pub name: String,
    /// Contribution in minor units. May be negative.
    pub amount_minor: i64,
}

/// The customer-facing price decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdownInfo {
    /// Base price in minor units.
    pub base_minor: i64,
    /// Named adjustments in application order.
    pub modifiers: Vec<PriceModifierInfo>,
    /// Clamped linear amount before the multiplier, in minor units.
    pub subtotal_minor: i64,
    /// Deposit due at confirmation, in minor units.
    pub deposit_minor: i64,
    /// Balance due before the trip, in minor units.
    pub balance_minor: i64,
    /// Final amount in minor units.
    pub total_minor: i64,
}

impl PriceBreakdownInfo {
    /// Builds the DTO from a domain breakdown.
    #[must_use]
    pub fn from_breakdown(breakdown: &PriceBreakdown) -> Self {
        Self {
            base_minor: breakdown.base.minor_units(),
            modifiers: breakdown
                .modifiers
                .iter()
                .map(|modifier| PriceModifierInfo {
                    name: modifier.name.clone(),
                    amount_minor: modifier.amount.minor_units(),
                })
                .collect(),
            subtotal_minor: breakdown.subtotal.minor_units(),
            deposit_minor: breakdown.deposit_amount.minor_units(),
            balance_minor: breakdown.balance_amount.minor_units(),
            total_minor: breakdown.total.minor_units(),
        }
    }
}

/// Response for a price quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePriceResponse {
    /// The price decomposition.
    pub breakdown: PriceBreakdownInfo,
    /// The rule snapshot version the quote was computed against.
    pub snapshot_version: u64,
}

/// Request to commit a booking at a selected start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitBookingRequest {
    /// The requested date (`YYYY-MM-DD`).
    pub date: String,
    /// The selected start time (`HH:MM:SS`).
    pub selected_start: String,
    /// The requested duration in minutes.
    pub duration_minutes: u32,
    /// The number of passengers.
    pub party_size: u32,
    /// The desired vehicle class, or `None` for "any".
    #[serde(default)]
    pub vehicle_class: Option<String>,
}

/// A committed or retrieved booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    /// Canonical booking id.
    pub booking_id: i64,
    /// Customer-facing booking number.
    pub booking_number: String,
    /// Assigned vehicle id.
    pub vehicle_id: i64,
    /// Assigned driver id.
    pub driver_id: i64,
    /// Trip date (`YYYY-MM-DD`).
    pub date: String,
    /// Window start (`HH:MM:SS`).
    pub start_time: String,
    /// Window end (`HH:MM:SS`).
    pub end_time: String,
    /// Number of passengers.
    pub party_size: u32,
    /// Lifecycle status.
    pub status: String,
    /// The price decomposition.
    pub breakdown: PriceBreakdownInfo,
    /// Creation timestamp (ISO 8601, UTC).
    pub created_at: String,
    /// Last update timestamp (ISO 8601, UTC).
    pub updated_at: String,
}

impl BookingInfo {
    /// Builds the DTO from a domain booking.
    ///
    /// The booking must have been persisted (carry an id).
    #[must_use]
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            booking_id: booking.booking_id.unwrap_or_default(),
            booking_number: booking.number.to_string(),
            vehicle_id: booking.vehicle_id.value(),
            driver_id: booking.driver_id.value(),
            date: booking.window.date.to_string(),
            start_time: format_time_string(booking.window.start),
            end_time: format_time_string(booking.window.end),
            party_size: booking.party_size,
            status: booking.status.as_str().to_string(),
            breakdown: PriceBreakdownInfo::from_breakdown(&booking.breakdown),
            created_at: booking.created_at.clone(),
            updated_at: booking.updated_at.clone(),
        }
    }
}

/// Response for a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitBookingResponse {
    /// The committed booking, in `held` status.
    pub booking: BookingInfo,
    /// A success message.
    pub message: String,
}

/// Response for a lifecycle action (release, confirm, complete, cancel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingActionResponse {
    /// The booking after the action.
    pub booking: BookingInfo,
    /// A success message.
    pub message: String,
}

/// One timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEventInfo {
    /// Event id.
    pub event_id: i64,
    /// Action name.
    pub action: String,
    /// Optional action details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Acting entity id.
    pub actor_id: String,
    /// Acting entity type.
    pub actor_type: String,
    /// Cause id.
    pub cause_id: String,
    /// Cause description.
    pub cause_description: String,
    /// Status before the change, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_status: Option<String>,
    /// Status after the change.
    pub after_status: String,
}

impl TimelineEventInfo {
    /// Builds the DTO from a timeline event.
    #[must_use]
    pub fn from_event(event: &TimelineEvent) -> Self {
        Self {
            event_id: event.event_id.unwrap_or_default(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            before_status: event.before.map(|status| status.as_str().to_string()),
            after_status: event.after.as_str().to_string(),
        }
    }
}

/// Response carrying a booking's ordered timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTimelineResponse {
    /// The booking id the timeline belongs to.
    pub booking_id: i64,
    /// Events in creation order.
    pub events: Vec<TimelineEventInfo>,
}
