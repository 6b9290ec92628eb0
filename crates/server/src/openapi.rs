use utoipa::OpenApi;

use crate::models::{CreateFeed, CreateFeedFollow, CreateUser, Feed, FeedFollow, Post, User};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "feedhive API",
        version = "1.0.0"
    ),
    tags(
        (name = "health", description = "Liveness and error-shape endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "feeds", description = "Feed management endpoints"),
        (name = "feed_follows", description = "Feed subscription endpoints"),
        (name = "posts", description = "Ingested post endpoints")
    ),
    components(schemas(
        User,
        CreateUser,
        Feed,
        CreateFeed,
        FeedFollow,
        CreateFeedFollow,
        Post
    ))
)]
pub struct ApiDoc;
