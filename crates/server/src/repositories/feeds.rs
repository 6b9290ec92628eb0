use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::{RepoError, RepoResult};
use crate::models::{CreateFeed, Feed};

const SELECT_FEED: &str = r#"
    SELECT id, created_at, updated_at, name, url, user_id, last_fetched_at
    FROM feeds
"#;

pub struct FeedRepository;

impl FeedRepository {
    pub async fn create(pool: &SqlitePool, user_id: i64, data: CreateFeed) -> RepoResult<Feed> {
        let result = sqlx::query(
            r#"
            INSERT INTO feeds (name, url, user_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(data.url.trim())
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        let id: i64 = result.get("id");
        Self::get_by_id(pool, id)
            .await?
            .ok_or(RepoError::Database(sqlx::Error::RowNotFound))
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Feed>> {
        let query = format!("{} WHERE id = $1", SELECT_FEED);
        let feed = sqlx::query_as::<_, Feed>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(feed)
    }

    pub async fn get_all(pool: &SqlitePool) -> RepoResult<Vec<Feed>> {
        let query = format!("{} ORDER BY created_at DESC", SELECT_FEED);
        let feeds = sqlx::query_as::<_, Feed>(&query).fetch_all(pool).await?;

        Ok(feeds)
    }

    /// The feeds most overdue for a fetch: never-fetched first, then by
    /// oldest `last_fetched_at`, ties broken by id.
    pub async fn next_to_fetch(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Feed>> {
        let query = format!(
            "{} ORDER BY last_fetched_at ASC NULLS FIRST, id ASC LIMIT $1",
            SELECT_FEED
        );
        let feeds = sqlx::query_as::<_, Feed>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        Ok(feeds)
    }

    /// Stamp `last_fetched_at` with the current time. The scraper calls
    /// this before fetching, so a slow feed is not re-selected while its
    /// fetch is still in flight.
    pub async fn mark_fetched(pool: &SqlitePool, id: i64) -> RepoResult<Feed> {
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE feeds
            SET last_fetched_at = $1, updated_at = $1
            WHERE id = $2
            "#,
        )
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

        Self::get_by_id(pool, id)
            .await?
            .ok_or(RepoError::Database(sqlx::Error::RowNotFound))
    }
}
