use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered account that can own and follow feeds.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,

    pub name: String,
    /// Credential presented as `Authorization: ApiKey <key>`
    pub api_key: String,
}

/// Request body for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUser {
    pub name: String,
}
