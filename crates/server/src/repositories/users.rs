use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::{Row, SqlitePool};

use super::{RepoError, RepoResult};
use crate::models::{CreateUser, User};

const SELECT_USER: &str = r#"
    SELECT id, created_at, updated_at, name, api_key
    FROM users
"#;

pub struct UserRepository;

impl UserRepository {
    /// Create a new user with a freshly generated api key
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> RepoResult<User> {
        let api_key = generate_api_key();

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, api_key)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&api_key)
        .fetch_one(pool)
        .await?;

        let id: i64 = result.get("id");
        Self::get_by_id(pool, id)
            .await?
            .ok_or(RepoError::Database(sqlx::Error::RowNotFound))
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
        let query = format!("{} WHERE id = $1", SELECT_USER);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    pub async fn get_by_api_key(pool: &SqlitePool, api_key: &str) -> RepoResult<Option<User>> {
        let query = format!("{} WHERE api_key = $1", SELECT_USER);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(api_key)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }
}

fn generate_api_key() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);

    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::test_pool;

    #[tokio::test]
    async fn it_creates_users_with_distinct_api_keys() {
        let pool = test_pool().await;

        let alice = UserRepository::create(&pool, CreateUser { name: "alice".into() })
            .await
            .unwrap();
        let bob = UserRepository::create(&pool, CreateUser { name: "bob".into() })
            .await
            .unwrap();

        assert_eq!(alice.name, "alice");
        assert_eq!(alice.api_key.len(), 64);
        assert_ne!(alice.api_key, bob.api_key);
    }

    #[tokio::test]
    async fn it_looks_up_users_by_api_key() {
        let pool = test_pool().await;

        let user = UserRepository::create(&pool, CreateUser { name: "alice".into() })
            .await
            .unwrap();

        let found = UserRepository::get_by_api_key(&pool, &user.api_key)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);

        let missing = UserRepository::get_by_api_key(&pool, "no-such-key")
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
