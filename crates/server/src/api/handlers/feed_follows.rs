use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::ApiUser;
use crate::error::{AppError, AppResult};
use crate::models::{CreateFeedFollow, FeedFollow};
use crate::repositories::{FeedFollowRepository, FeedRepository, RepoError};
use crate::state::AppState;

/// Follow a feed
#[utoipa::path(
    post,
    path = "/v1/feed_follows",
    tag = "feed_follows",
    request_body = CreateFeedFollow,
    responses(
        (status = 201, description = "Follow created", body = FeedFollow),
        (status = 400, description = "Already following, or no such feed"),
        (status = 401, description = "Unknown api key"),
        (status = 403, description = "Missing or malformed auth header")
    )
)]
pub async fn create_feed_follow(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Json(payload): Json<CreateFeedFollow>,
) -> AppResult<(StatusCode, Json<FeedFollow>)> {
    if FeedRepository::get_by_id(&state.db, payload.feed_id)
        .await?
        .is_none()
    {
        return Err(AppError::bad_request("no such feed"));
    }

    match FeedFollowRepository::create(&state.db, user.id, payload).await {
        Ok(follow) => Ok((StatusCode::CREATED, Json(follow))),
        Err(RepoError::UniqueViolation) => {
            Err(AppError::bad_request("already following this feed"))
        }
        Err(e) => Err(e.into()),
    }
}

/// The caller's follows
#[utoipa::path(
    get,
    path = "/v1/feed_follows",
    tag = "feed_follows",
    responses(
        (status = 200, description = "Every feed the caller follows", body = Vec<FeedFollow>),
        (status = 401, description = "Unknown api key"),
        (status = 403, description = "Missing or malformed auth header")
    )
)]
pub async fn get_feed_follows(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
) -> AppResult<Json<Vec<FeedFollow>>> {
    let follows = FeedFollowRepository::get_by_user_id(&state.db, user.id).await?;

    Ok(Json(follows))
}

/// Unfollow a feed
#[utoipa::path(
    delete,
    path = "/v1/feed_follows/{id}",
    tag = "feed_follows",
    params(
        ("id" = i64, Path, description = "Feed follow id")
    ),
    responses(
        (status = 200, description = "Follow removed"),
        (status = 401, description = "Unknown api key"),
        (status = 403, description = "Missing or malformed auth header"),
        (status = 404, description = "Not following, or someone else's follow")
    )
)]
pub async fn delete_feed_follow(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = FeedFollowRepository::delete(&state.db, id, user.id).await?;

    if !removed {
        return Err(AppError::not_found("feed follow not found"));
    }

    Ok(Json(serde_json::json!({})))
}
