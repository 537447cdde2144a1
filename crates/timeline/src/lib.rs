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

use tour_book_domain::BookingStatus;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This could be an operator, a system process, or an automated trigger
/// such as the hold-expiry reaper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "operator", "system", "reaper").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`CommitBooking`", "`ReleaseBooking`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// An immutable timeline event recording one booking state change.
///
/// Every successful state change must produce exactly one timeline event.
/// Events are append-only and immutable once created; they capture who
/// performed the action, why, what was performed, and the booking status
/// before and after the change. The commit that creates a booking has no
/// prior status, so `before` is `None` there and only there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEvent {
    /// The event identifier, assigned by the persistence layer.
    /// `None` until persisted.
    pub event_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The booking status before the change (`None` at creation).
    pub before: Option<BookingStatus>,
    /// The booking status after the change.
    pub after: BookingStatus,
}

impl TimelineEvent {
    /// Creates a new `TimelineEvent`.
    ///
    /// Once created, a timeline event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The booking status before the change
    /// * `after` - The booking status after the change
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: Option<BookingStatus>,
        after: BookingStatus,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Creates the event recording a booking's creation.
    ///
    /// The booking did not exist before, so there is no prior status and
    /// the resulting status is always `Held`.
    #[must_use]
    pub const fn created(actor: Actor, cause: Cause, action: Action) -> Self {
        Self::new(actor, cause, action, None, BookingStatus::Held)
    }
}
