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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use tour_book::ResourceLockRegistry;
use tour_book_api::{
    ApiError, BookingActionResponse, CheckAvailabilityRequest, CheckAvailabilityResponse,
    CommitBookingRequest, CommitBookingResponse, GetTimelineResponse, QuotePriceRequest,
    QuotePriceResponse, StaticResourceDirectory, StaticRuleStore, cancel_booking,
    check_availability, commit_booking, complete_booking, confirm_booking, get_booking,
    get_booking_by_number, get_booking_timeline, quote_price, release_booking,
};
use tour_book_domain::BookingConfig;
use tour_book_persistence::Persistence;
use tour_book_timeline::{Actor, Cause};

/// Tour Book Server - HTTP server for the Tour Book booking core
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Path to the resource directory fixture (JSON).
    #[arg(long)]
    resources: PathBuf,

    /// Path to the rule store fixture (JSON).
    #[arg(long)]
    rules: PathBuf,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for bookings and the timeline.
    persistence: Arc<Mutex<Persistence>>,
    /// The per-resource lock registry for commit coordination.
    locks: Arc<ResourceLockRegistry>,
    /// The fleet/roster directory snapshot.
    directory: Arc<StaticResourceDirectory>,
    /// The rule store snapshot.
    rules: Arc<StaticRuleStore>,
    /// The operational configuration.
    config: Arc<BookingConfig>,
}

/// Actor and cause attribution carried by every mutating request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Attribution {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor (e.g., "operator", "system", "reaper").
    actor_type: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl Attribution {
    fn actor(&self) -> Actor {
        Actor::new(self.actor_id.clone(), self.actor_type.clone())
    }

    fn cause(&self) -> Cause {
        Cause::new(self.cause_id.clone(), self.cause_description.clone())
    }
}

/// API request for committing a booking.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CommitBookingApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    #[serde(flatten)]
    booking: CommitBookingRequest,
}

/// API request for a lifecycle action (release, confirm, complete, cancel).
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BookingActionApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
}

/// Error payload returned for failed API calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Human-readable error description.
    error: String,
    /// Whether the caller may retry the same operation.
    retryable: bool,
}

/// Maps an `ApiError` to an HTTP response.
fn error_response(err: &ApiError) -> Response {
    let status: StatusCode = match err {
        ApiError::InvalidRequest { .. } | ApiError::OutOfWindow { .. } => StatusCode::BAD_REQUEST,
        ApiError::SlotNoLongerAvailable { .. } | ApiError::DomainRuleViolation { .. } => {
            StatusCode::CONFLICT
        }
        ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::AmbiguousRule { .. }
        | ApiError::RuleConfiguration { .. }
        | ApiError::Persistence { .. }
        | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(%err, "Request failed");
    }
    let body = ErrorResponse {
        error: err.to_string(),
        retryable: err.is_retryable(),
    };
    (status, Json(body)).into_response()
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn check_availability_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CheckAvailabilityRequest>,
) -> Response {
    let result: Result<CheckAvailabilityResponse, ApiError> = check_availability(
        &state.persistence,
        state.directory.as_ref(),
        state.rules.as_ref(),
        &state.config,
        &request,
    );
    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn quote_price_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<QuotePriceRequest>,
) -> Response {
    let result: Result<QuotePriceResponse, ApiError> =
        quote_price(state.rules.as_ref(), &state.config, &request);
    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn commit_booking_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CommitBookingApiRequest>,
) -> Response {
    let result: Result<CommitBookingResponse, ApiError> = commit_booking(
        &state.persistence,
        &state.locks,
        state.directory.as_ref(),
        state.rules.as_ref(),
        &state.config,
        &request.attribution.actor(),
        &request.attribution.cause(),
        &request.booking,
    );
    match result {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn release_booking_handler(
    AxumState(state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(request): Json<BookingActionApiRequest>,
) -> Response {
    respond_action(release_booking(
        &state.persistence,
        &request.attribution.actor(),
        &request.attribution.cause(),
        booking_id,
    ))
}

async fn confirm_booking_handler(
    AxumState(state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(request): Json<BookingActionApiRequest>,
) -> Response {
    respond_action(confirm_booking(
        &state.persistence,
        &request.attribution.actor(),
        &request.attribution.cause(),
        booking_id,
    ))
}

async fn complete_booking_handler(
    AxumState(state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(request): Json<BookingActionApiRequest>,
) -> Response {
    respond_action(complete_booking(
        &state.persistence,
        &request.attribution.actor(),
        &request.attribution.cause(),
        booking_id,
    ))
}

async fn cancel_booking_handler(
    AxumState(state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(request): Json<BookingActionApiRequest>,
) -> Response {
    respond_action(cancel_booking(
        &state.persistence,
        &request.attribution.actor(),
        &request.attribution.cause(),
        booking_id,
    ))
}

fn respond_action(result: Result<BookingActionResponse, ApiError>) -> Response {
    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn get_booking_handler(
    AxumState(state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
) -> Response {
    match get_booking(&state.persistence, booking_id) {
        Ok(info) => Json(info).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn get_booking_by_number_handler(
    AxumState(state): AxumState<AppState>,
    Path(booking_number): Path<String>,
) -> Response {
    match get_booking_by_number(&state.persistence, &booking_number) {
        Ok(info) => Json(info).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn get_timeline_handler(
    AxumState(state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
) -> Response {
    let result: Result<GetTimelineResponse, ApiError> =
        get_booking_timeline(&state.persistence, booking_id);
    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/availability/check", post(check_availability_handler))
        .route("/api/price/quote", post(quote_price_handler))
        .route("/api/bookings", post(commit_booking_handler))
        .route("/api/bookings/{booking_id}", get(get_booking_handler))
        .route(
            "/api/bookings/number/{booking_number}",
            get(get_booking_by_number_handler),
        )
        .route(
            "/api/bookings/{booking_id}/release",
            post(release_booking_handler),
        )
        .route(
            "/api/bookings/{booking_id}/confirm",
            post(confirm_booking_handler),
        )
        .route(
            "/api/bookings/{booking_id}/complete",
            post(complete_booking_handler),
        )
        .route(
            "/api/bookings/{booking_id}/cancel",
            post(cancel_booking_handler),
        )
        .route(
            "/api/bookings/{booking_id}/timeline",
            get(get_timeline_handler),
        )
        .with_state(state)
}

fn build_state(args: &Args) -> Result<AppState, Box<dyn std::error::Error>> {
    let persistence: Persistence = match &args.database {
        Some(path) => {
            info!(path, "Opening SQLite database");
            Persistence::new_with_file(path)?
        }
        None => {
            info!("Using in-memory SQLite database");
            Persistence::new_in_memory()?
        }
    };

    let directory = StaticResourceDirectory::from_json_file(&args.resources)?;
    let rules = StaticRuleStore::from_json_file(&args.rules)?;
    let config = BookingConfig::standard()?;

    Ok(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        locks: Arc::new(ResourceLockRegistry::new()),
        directory: Arc::new(directory),
        rules: Arc::new(rules),
        config: Arc::new(config),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let state: AppState = build_state(&args)?;
    let router: Router = build_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    info!(%addr, "Starting Tour Book server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
