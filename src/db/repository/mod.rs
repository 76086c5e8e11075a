//! Repository Module
//!
//! Owner-scoped CRUD over the SQLite tables. Each entity gets a module of
//! async functions taking the pool; every read and write carries the
//! owner's user id in its WHERE clause so cross-user access is impossible
//! at this layer.

pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            // The API surfaces duplicates as field validation failures (400)
            RepoError::Duplicate(msg) => AppError::Validation(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Render an id slice as a SQL IN-list body (`"1,2,3"`).
///
/// Only ever called with ids already parsed as integers, so the result is
/// safe to splice into a query string.
pub(crate) fn id_list_sql(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
