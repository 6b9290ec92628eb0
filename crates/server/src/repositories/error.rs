use thiserror::Error;

/// Storage-layer error with duplicate-key rejections split out as their
/// own variant, so callers can branch on them without inspecting driver
/// error text.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The row would violate a uniqueness constraint. For inserts that
    /// are retried every cycle this is an expected outcome, not a
    /// failure.
    #[error("unique constraint violation")]
    UniqueViolation,

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        if e.as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            return Self::UniqueViolation;
        }

        Self::Database(e)
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
