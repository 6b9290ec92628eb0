use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One ingested feed item, uniquely keyed by `(feed_id, url)`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,

    pub title: String,
    /// Canonical link of the item
    pub url: String,
    /// NULL when the source provides no description
    pub description: Option<String>,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub feed_id: i64,
}

/// Insert payload built by the scraper for each parsed item.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub feed_id: i64,
}
