use sqlx::{Row, SqlitePool};

use super::{RepoError, RepoResult};
use crate::models::{CreatePost, Post};

const SELECT_POST: &str = r#"
    SELECT id, created_at, updated_at, title, url, description, published_at, feed_id
    FROM posts
"#;

pub struct PostRepository;

impl PostRepository {
    /// Insert one ingested item. A `(feed_id, url)` collision surfaces
    /// as [`RepoError::UniqueViolation`]; the row already stored wins
    /// and is never updated.
    pub async fn create(pool: &SqlitePool, data: CreatePost) -> RepoResult<Post> {
        let result = sqlx::query(
            r#"
            INSERT INTO posts (title, url, description, published_at, feed_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(&data.url)
        .bind(&data.description)
        .bind(data.published_at)
        .bind(data.feed_id)
        .fetch_one(pool)
        .await?;

        let id: i64 = result.get("id");
        Self::get_by_id(pool, id)
            .await?
            .ok_or(RepoError::Database(sqlx::Error::RowNotFound))
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Post>> {
        let query = format!("{} WHERE id = $1", SELECT_POST);
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(post)
    }

    pub async fn get_by_feed_id(pool: &SqlitePool, feed_id: i64) -> RepoResult<Vec<Post>> {
        let query = format!(
            "{} WHERE feed_id = $1 ORDER BY published_at DESC",
            SELECT_POST
        );
        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(feed_id)
            .fetch_all(pool)
            .await?;

        Ok(posts)
    }

    /// Newest posts across every feed the user follows
    pub async fn get_for_user(
        pool: &SqlitePool,
        user_id: i64,
        limit: i64,
    ) -> RepoResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT posts.id, posts.created_at, posts.updated_at, posts.title,
                   posts.url, posts.description, posts.published_at, posts.feed_id
            FROM posts
            INNER JOIN feed_follows ON feed_follows.feed_id = posts.feed_id
            WHERE feed_follows.user_id = $1
            ORDER BY posts.published_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sqlx::SqlitePool;

    use crate::models::{CreateFeed, CreateFeedFollow, CreateUser};
    use crate::repositories::{FeedFollowRepository, FeedRepository, UserRepository};
    use crate::test_util::test_pool;

    async fn seed_feed(pool: &SqlitePool, name: &str) -> (i64, i64) {
        let user = UserRepository::create(pool, CreateUser { name: "alice".into() })
            .await
            .unwrap();
        let feed = FeedRepository::create(
            pool,
            user.id,
            CreateFeed {
                name: name.to_string(),
                url: format!("https://example.com/{}.xml", name),
            },
        )
        .await
        .unwrap();

        (user.id, feed.id)
    }

    fn post(feed_id: i64, url: &str) -> CreatePost {
        CreatePost {
            title: "A post".into(),
            url: url.to_string(),
            description: Some("words".into()),
            published_at: Utc.with_ymd_and_hms(2006, 1, 2, 22, 4, 5).unwrap(),
            feed_id,
        }
    }

    #[tokio::test]
    async fn it_classifies_duplicate_links_as_unique_violations() {
        let pool = test_pool().await;
        let (_, feed_id) = seed_feed(&pool, "blog").await;

        PostRepository::create(&pool, post(feed_id, "https://example.com/one"))
            .await
            .unwrap();
        let duplicate = PostRepository::create(&pool, post(feed_id, "https://example.com/one")).await;

        assert!(matches!(duplicate, Err(RepoError::UniqueViolation)));

        let stored = PostRepository::get_by_feed_id(&pool, feed_id).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn it_allows_the_same_link_under_different_feeds() {
        let pool = test_pool().await;
        let (user_id, feed_a) = seed_feed(&pool, "a").await;
        let feed_b = FeedRepository::create(
            &pool,
            user_id,
            CreateFeed {
                name: "b".into(),
                url: "https://example.com/b.xml".into(),
            },
        )
        .await
        .unwrap()
        .id;

        PostRepository::create(&pool, post(feed_a, "https://example.com/shared"))
            .await
            .unwrap();
        PostRepository::create(&pool, post(feed_b, "https://example.com/shared"))
            .await
            .unwrap();

        assert_eq!(
            PostRepository::get_by_feed_id(&pool, feed_b).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn it_returns_followed_posts_only() {
        let pool = test_pool().await;
        let (user_id, followed) = seed_feed(&pool, "followed").await;
        let other = FeedRepository::create(
            &pool,
            user_id,
            CreateFeed {
                name: "other".into(),
                url: "https://example.com/other.xml".into(),
            },
        )
        .await
        .unwrap()
        .id;

        FeedFollowRepository::create(&pool, user_id, CreateFeedFollow { feed_id: followed })
            .await
            .unwrap();

        PostRepository::create(&pool, post(followed, "https://example.com/in"))
            .await
            .unwrap();
        PostRepository::create(&pool, post(other, "https://example.com/out"))
            .await
            .unwrap();

        let posts = PostRepository::get_for_user(&pool, user_id, 20).await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, "https://example.com/in");
    }
}
