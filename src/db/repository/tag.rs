//! Tag Repository

use super::{RepoResult, id_list_sql};
use crate::db::models::Tag;
use sqlx::SqlitePool;

const TAG_SELECT: &str = "SELECT id, user_id, name FROM tag";

/// List the caller's tags, name-descending.
///
/// With `assigned_only`, restrict to tags linked to at least one recipe
/// (any owner's); the EXISTS subquery keeps each tag unique however many
/// recipes reference it.
pub async fn list_by_owner(
    pool: &SqlitePool,
    user_id: i64,
    assigned_only: bool,
) -> RepoResult<Vec<Tag>> {
    let mut sql = format!("{TAG_SELECT} WHERE user_id = ?");
    if assigned_only {
        sql.push_str(" AND EXISTS (SELECT 1 FROM recipe_tag rt WHERE rt.tag_id = tag.id)");
    }
    sql.push_str(" ORDER BY name DESC");

    let rows = sqlx::query_as::<_, Tag>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Create a tag owned by `user_id`. Duplicate names per user are allowed.
pub async fn create(pool: &SqlitePool, user_id: i64, name: &str) -> RepoResult<Tag> {
    let result = sqlx::query("INSERT INTO tag (user_id, name) VALUES (?, ?)")
        .bind(user_id)
        .bind(name)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    Ok(Tag {
        id,
        user_id,
        name: name.to_string(),
    })
}

/// Count how many of the given ids exist, for association validation
pub async fn count_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<i64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let sql = format!("SELECT COUNT(*) FROM tag WHERE id IN ({})", id_list_sql(ids));
    let count: (i64,) = sqlx::query_as(&sql).fetch_one(pool).await?;
    Ok(count.0)
}
