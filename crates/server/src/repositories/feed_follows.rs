use sqlx::{Row, SqlitePool};

use super::{RepoError, RepoResult};
use crate::models::{CreateFeedFollow, FeedFollow};

const SELECT_FEED_FOLLOW: &str = r#"
    SELECT id, created_at, updated_at, user_id, feed_id
    FROM feed_follows
"#;

pub struct FeedFollowRepository;

impl FeedFollowRepository {
    pub async fn create(
        pool: &SqlitePool,
        user_id: i64,
        data: CreateFeedFollow,
    ) -> RepoResult<FeedFollow> {
        let result = sqlx::query(
            r#"
            INSERT INTO feed_follows (user_id, feed_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(data.feed_id)
        .fetch_one(pool)
        .await?;

        let id: i64 = result.get("id");
        Self::get_by_id(pool, id)
            .await?
            .ok_or(RepoError::Database(sqlx::Error::RowNotFound))
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<FeedFollow>> {
        let query = format!("{} WHERE id = $1", SELECT_FEED_FOLLOW);
        let follow = sqlx::query_as::<_, FeedFollow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(follow)
    }

    pub async fn get_by_user_id(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<FeedFollow>> {
        let query = format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_FEED_FOLLOW
        );
        let follows = sqlx::query_as::<_, FeedFollow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        Ok(follows)
    }

    /// Delete one of the user's own follows. Returns false when the id
    /// does not exist or belongs to another user.
    pub async fn delete(pool: &SqlitePool, id: i64, user_id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM feed_follows WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
