use axum::{extract::State, http::StatusCode, Json};

use crate::api::ApiUser;
use crate::error::AppResult;
use crate::models::{CreateUser, User};
use crate::repositories::UserRepository;
use crate::state::AppState;

/// Register a new user
#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created, api key included", body = User),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = UserRepository::create(&state.db, payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// The authenticated caller's own record
#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "The current user", body = User),
        (status = 401, description = "Unknown api key"),
        (status = 403, description = "Missing or malformed auth header")
    )
)]
pub async fn get_user(ApiUser(user): ApiUser) -> Json<User> {
    Json(user)
}
