//! User Repository

use super::{RepoError, RepoResult};
use crate::db::models::User;
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

const USER_SELECT: &str =
    "SELECT id, email, password_hash, name, is_active, is_staff, is_superuser, created_at FROM user";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE email = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Create a regular user. Email must already be normalized (lowercased)
/// and the password hashed by the caller.
pub async fn create(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    name: &str,
) -> RepoResult<User> {
    create_with_flags(pool, email, password_hash, name, false, false).await
}

/// Create a superuser (administrative bootstrap path)
pub async fn create_superuser(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> RepoResult<User> {
    create_with_flags(pool, email, password_hash, "", true, true).await
}

async fn create_with_flags(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    name: &str,
    is_staff: bool,
    is_superuser: bool,
) -> RepoResult<User> {
    if find_by_email(pool, email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "User with email '{email}' already exists"
        )));
    }

    let now = now_millis();
    let result = sqlx::query(
        "INSERT INTO user (email, password_hash, name, is_active, is_staff, is_superuser, created_at) VALUES (?, ?, ?, 1, ?, ?, ?)",
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(is_staff)
    .bind(is_superuser)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Self-service profile update (name only)
pub async fn update_name(pool: &SqlitePool, id: i64, name: &str) -> RepoResult<User> {
    let rows = sqlx::query("UPDATE user SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}
