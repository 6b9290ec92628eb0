use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::ApiUser;
use crate::error::AppResult;
use crate::models::Post;
use crate::repositories::PostRepository;
use crate::state::AppState;

const DEFAULT_POSTS_LIMIT: i64 = 20;

/// Query parameters for listing posts
#[derive(Debug, Deserialize, IntoParams)]
pub struct PostsQuery {
    /// Maximum number of posts to return (default 20)
    pub limit: Option<i64>,
}

/// Newest posts across the feeds the caller follows
#[utoipa::path(
    get,
    path = "/v1/posts",
    tag = "posts",
    params(PostsQuery),
    responses(
        (status = 200, description = "Posts, newest first", body = Vec<Post>),
        (status = 401, description = "Unknown api key"),
        (status = 403, description = "Missing or malformed auth header")
    )
)]
pub async fn get_posts(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Query(query): Query<PostsQuery>,
) -> AppResult<Json<Vec<Post>>> {
    let limit = query.limit.unwrap_or(DEFAULT_POSTS_LIMIT).max(1);
    let posts = PostRepository::get_for_user(&state.db, user.id, limit).await?;

    Ok(Json(posts))
}
