use axum::{extract::State, http::StatusCode, Json};

use crate::api::ApiUser;
use crate::error::{AppError, AppResult};
use crate::models::{CreateFeed, CreateFeedFollow, Feed};
use crate::repositories::{FeedFollowRepository, FeedRepository, RepoError};
use crate::state::AppState;

/// Register a feed for periodic ingestion
///
/// The creator automatically follows the new feed.
#[utoipa::path(
    post,
    path = "/v1/feeds",
    tag = "feeds",
    request_body = CreateFeed,
    responses(
        (status = 201, description = "Feed created", body = Feed),
        (status = 400, description = "A feed with this url already exists"),
        (status = 401, description = "Unknown api key"),
        (status = 403, description = "Missing or malformed auth header")
    )
)]
pub async fn create_feed(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Json(payload): Json<CreateFeed>,
) -> AppResult<(StatusCode, Json<Feed>)> {
    let feed = match FeedRepository::create(&state.db, user.id, payload).await {
        Ok(feed) => feed,
        Err(RepoError::UniqueViolation) => {
            return Err(AppError::bad_request("a feed with this url already exists"))
        }
        Err(e) => return Err(e.into()),
    };

    let follow = CreateFeedFollow { feed_id: feed.id };
    if let Err(e) = FeedFollowRepository::create(&state.db, user.id, follow).await {
        tracing::error!("Failed to create follow for new feed {}: {}", feed.id, e);
    }

    Ok((StatusCode::CREATED, Json(feed)))
}

/// All feeds known to the system
#[utoipa::path(
    get,
    path = "/v1/feeds",
    tag = "feeds",
    responses(
        (status = 200, description = "Every registered feed", body = Vec<Feed>)
    )
)]
pub async fn get_feeds(State(state): State<AppState>) -> AppResult<Json<Vec<Feed>>> {
    let feeds = FeedRepository::get_all(&state.db).await?;

    Ok(Json(feeds))
}
