use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use covoit_shared::{NewRide, Ride, RidePatch};
use serde::Deserialize;

use crate::error::AppError;
use crate::params::{optional_id, required_id};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RideQuery {
    pub ride_id: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/rides",
        get(get_rides)
            .post(create_ride)
            .patch(update_ride)
            .delete(delete_ride),
    )
}

/// GET /rides, GET /rides?ride_id=...
async fn get_rides(
    State(state): State<AppState>,
    query: Result<Query<RideQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;

    if let Some(ride_id) = optional_id("ride_id", query.ride_id)? {
        let ride = state.rides.find_by_id(ride_id).await?;
        return Ok(Json(ride).into_response());
    }

    let rides = state.rides.list().await?;
    Ok(Json(rides).into_response())
}

/// POST /rides
async fn create_ride(
    State(state): State<AppState>,
    body: Result<Json<NewRide>, JsonRejection>,
) -> Result<(StatusCode, Json<Ride>), AppError> {
    let Json(new_ride) = body?;
    let ride = state.rides.create(new_ride).await?;
    Ok((StatusCode::CREATED, Json(ride)))
}

/// PATCH /rides?ride_id=...
async fn update_ride(
    State(state): State<AppState>,
    query: Result<Query<RideQuery>, QueryRejection>,
    body: Result<Json<RidePatch>, JsonRejection>,
) -> Result<Json<Ride>, AppError> {
    let Query(query) = query?;
    let ride_id = required_id("ride_id", query.ride_id)?;
    let Json(patch) = body?;

    let ride = state.rides.update(ride_id, patch).await?;
    Ok(Json(ride))
}

/// DELETE /rides?ride_id=...
async fn delete_ride(
    State(state): State<AppState>,
    query: Result<Query<RideQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Query(query) = query?;
    let ride_id = required_id("ride_id", query.ride_id)?;

    state.rides.delete(ride_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
