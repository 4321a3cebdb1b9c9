use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use covoit_shared::{NewUser, User, UserPatch};
use serde::Deserialize;

use crate::error::AppError;
use crate::params::{non_empty, optional_id, required_id};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub email: Option<String>,
    pub user_id: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/users",
        get(get_users)
            .post(create_user)
            .patch(update_user)
            .delete(delete_user),
    )
}

/// GET /users, GET /users?email=..., GET /users?user_id=...
///
/// `email` wins when both filters are given, but a malformed `user_id` is
/// still rejected.
async fn get_users(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let user_id = optional_id("user_id", query.user_id)?;

    if let Some(email) = non_empty(query.email) {
        let user = state.users.find_by_email(&email).await?;
        return Ok(Json(user).into_response());
    }
    if let Some(user_id) = user_id {
        let user = state.users.find_by_id(user_id).await?;
        return Ok(Json(user).into_response());
    }

    let users = state.users.list().await?;
    Ok(Json(users).into_response())
}

/// POST /users
async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let Json(new_user) = body?;
    let user = state.users.create(new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH /users?user_id=...
async fn update_user(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let Query(query) = query?;
    let user_id = required_id("user_id", query.user_id)?;
    let Json(patch) = body?;

    let user = state.users.update(user_id, patch).await?;
    Ok(Json(user))
}

/// DELETE /users?user_id=...
async fn delete_user(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Query(query) = query?;
    let user_id = required_id("user_id", query.user_id)?;

    state.users.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
