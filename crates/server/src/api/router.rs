use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{openapi::ApiDoc, state::AppState};

use super::handlers;

pub fn create_router(state: AppState) -> (Router, utoipa::openapi::OpenApi) {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(handlers::healthz))
        .routes(routes!(handlers::err))
        .routes(routes!(handlers::create_user, handlers::get_user))
        .routes(routes!(handlers::create_feed, handlers::get_feeds))
        .routes(routes!(
            handlers::create_feed_follow,
            handlers::get_feed_follows
        ))
        .routes(routes!(handlers::delete_feed_follow))
        .routes(routes!(handlers::get_posts))
        .with_state(state)
        .split_for_parts();

    (router, api)
}
