use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Subscription of a user to a feed, unique per `(user_id, feed_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct FeedFollow {
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,

    pub user_id: i64,
    pub feed_id: i64,
}

/// Request body for following a feed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFeedFollow {
    pub feed_id: i64,
}
