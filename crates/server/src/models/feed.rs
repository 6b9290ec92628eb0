use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A remote syndication source tracked by the system.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Feed {
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,

    pub name: String,
    /// Feed document URL
    pub url: String,
    /// Owning user
    pub user_id: i64,
    /// When the scraper last picked this feed up; never-fetched feeds
    /// carry NULL and are selected first
    pub last_fetched_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Request body for registering a new feed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFeed {
    pub name: String,
    pub url: String,
}
