use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use covoit_shared::{Booking, BookingPatch, NewBooking};
use serde::Deserialize;

use crate::error::AppError;
use crate::params::{optional_id, required_id};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub booking_id: Option<String>,
    pub user_id: Option<String>,
    pub ride_id: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/bookings",
        get(get_bookings)
            .post(create_booking)
            .patch(update_booking)
            .delete(delete_booking),
    )
}

/// GET /bookings, filtered by `booking_id`, then `user_id`, then `ride_id`.
async fn get_bookings(
    State(state): State<AppState>,
    query: Result<Query<BookingQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;

    // Parse every filter first so a bad id is a 400 whichever one is used.
    let booking_id = optional_id("booking_id", query.booking_id)?;
    let user_id = optional_id("user_id", query.user_id)?;
    let ride_id = optional_id("ride_id", query.ride_id)?;

    if let Some(booking_id) = booking_id {
        let booking = state.bookings.find_by_id(booking_id).await?;
        return Ok(Json(booking).into_response());
    }

    let bookings = match (user_id, ride_id) {
        (Some(user_id), _) => state.bookings.list_for_user(user_id).await?,
        (None, Some(ride_id)) => state.bookings.list_for_ride(ride_id).await?,
        (None, None) => state.bookings.list().await?,
    };
    Ok(Json(bookings).into_response())
}

/// POST /bookings
async fn create_booking(
    State(state): State<AppState>,
    body: Result<Json<NewBooking>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let Json(new_booking) = body?;
    let booking = state.bookings.create(new_booking).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// PATCH /bookings?booking_id=...
async fn update_booking(
    State(state): State<AppState>,
    query: Result<Query<BookingQuery>, QueryRejection>,
    body: Result<Json<BookingPatch>, JsonRejection>,
) -> Result<Json<Booking>, AppError> {
    let Query(query) = query?;
    let booking_id = required_id("booking_id", query.booking_id)?;
    let Json(patch) = body?;

    let booking = state.bookings.update(booking_id, patch).await?;
    Ok(Json(booking))
}

/// DELETE /bookings?booking_id=...
async fn delete_booking(
    State(state): State<AppState>,
    query: Result<Query<BookingQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Query(query) = query?;
    let booking_id = required_id("booking_id", query.booking_id)?;

    state.bookings.delete(booking_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
