//! Recipe Repository
//!
//! Owner-scoped CRUD plus association-set replacement, filtered listing
//! and the aggregate query. Association writes run inside a transaction
//! so a half-replaced set is never visible.

use std::collections::HashMap;

use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use super::{RepoError, RepoResult, id_list_sql};
use crate::db::models::{Ingredient, Recipe, RecipeAggregate, RecipeCreate, RecipePatch, Tag};
use crate::utils::time::now_millis;

const RECIPE_SELECT: &str =
    "SELECT id, user_id, title, time_minutes, price, link, image, created_at FROM recipe";

/// Optional listing filters, already parsed and validated
#[derive(Debug, Default, Clone)]
pub struct RecipeFilter {
    /// Match recipes linked to at least one of these tag ids
    pub tag_ids: Option<Vec<i64>>,
    /// Match recipes linked to at least one of these ingredient ids
    pub ingredient_ids: Option<Vec<i64>>,
}

/// List the caller's recipes, newest first.
///
/// Each supplied filter list is OR within itself; the two filters AND
/// together.
pub async fn list_by_owner(
    pool: &SqlitePool,
    user_id: i64,
    filter: &RecipeFilter,
) -> RepoResult<Vec<Recipe>> {
    let mut sql = format!("{RECIPE_SELECT} WHERE user_id = ?");
    if let Some(ids) = &filter.tag_ids {
        sql.push_str(&format!(
            " AND id IN (SELECT recipe_id FROM recipe_tag WHERE tag_id IN ({}))",
            id_list_sql(ids)
        ));
    }
    if let Some(ids) = &filter.ingredient_ids {
        sql.push_str(&format!(
            " AND id IN (SELECT recipe_id FROM recipe_ingredient WHERE ingredient_id IN ({}))",
            id_list_sql(ids)
        ));
    }
    sql.push_str(" ORDER BY id DESC");

    let rows = sqlx::query_as::<_, Recipe>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id_for_owner(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> RepoResult<Option<Recipe>> {
    let sql = format!("{RECIPE_SELECT} WHERE id = ? AND user_id = ?");
    let row = sqlx::query_as::<_, Recipe>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Create a recipe owned by `user_id` together with its association sets
pub async fn create(pool: &SqlitePool, user_id: i64, data: &RecipeCreate) -> RepoResult<Recipe> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO recipe (user_id, title, time_minutes, price, link, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(&data.title)
    .bind(data.time_minutes)
    .bind(data.price.to_string())
    .bind(&data.link)
    .bind(now_millis())
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();
    replace_tag_links(&mut tx, id, &data.tags).await?;
    replace_ingredient_links(&mut tx, id, &data.ingredients).await?;

    tx.commit().await?;

    find_by_id_for_owner(pool, id, user_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create recipe".into()))
}

/// Full replace (PUT): every writable field is overwritten and both
/// association sets are replaced with the supplied (possibly empty) ones.
/// The image column is untouched; it changes only via the upload endpoint.
pub async fn replace(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    data: &RecipeCreate,
) -> RepoResult<Recipe> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE recipe SET title = ?, time_minutes = ?, price = ?, link = ? WHERE id = ? AND user_id = ?",
    )
    .bind(&data.title)
    .bind(data.time_minutes)
    .bind(data.price.to_string())
    .bind(&data.link)
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Recipe {id} not found")));
    }

    replace_tag_links(&mut tx, id, &data.tags).await?;
    replace_ingredient_links(&mut tx, id, &data.ingredients).await?;

    tx.commit().await?;

    find_by_id_for_owner(pool, id, user_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Recipe {id} not found")))
}

/// Partial update (PATCH): only supplied fields change; a supplied
/// association array replaces that relation's set, an omitted one is
/// left untouched.
pub async fn patch(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    data: &RecipePatch,
) -> RepoResult<Recipe> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE recipe SET title = COALESCE(?, title), time_minutes = COALESCE(?, time_minutes), price = COALESCE(?, price), link = COALESCE(?, link) WHERE id = ? AND user_id = ?",
    )
    .bind(&data.title)
    .bind(data.time_minutes)
    .bind(data.price.map(|p| p.to_string()))
    .bind(&data.link)
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Recipe {id} not found")));
    }

    if let Some(tag_ids) = &data.tags {
        replace_tag_links(&mut tx, id, tag_ids).await?;
    }
    if let Some(ingredient_ids) = &data.ingredients {
        replace_ingredient_links(&mut tx, id, ingredient_ids).await?;
    }

    tx.commit().await?;

    find_by_id_for_owner(pool, id, user_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Recipe {id} not found")))
}

/// Delete an owned recipe; association rows cascade
pub async fn delete(pool: &SqlitePool, id: i64, user_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM recipe WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Point the recipe at a newly stored image file
pub async fn set_image(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    image_path: &str,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE recipe SET image = ? WHERE id = ? AND user_id = ?")
        .bind(image_path)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Recipe {id} not found")));
    }
    Ok(())
}

/// Per-recipe counts of associated tags and ingredients, recomputed on
/// every call
pub async fn aggregate(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> RepoResult<Option<RecipeAggregate>> {
    let row = sqlx::query(
        "SELECT r.title, r.price, \
         (SELECT COUNT(*) FROM recipe_tag rt WHERE rt.recipe_id = r.id) AS tag_count, \
         (SELECT COUNT(*) FROM recipe_ingredient ri WHERE ri.recipe_id = r.id) AS ingredient_count \
         FROM recipe r WHERE r.id = ? AND r.user_id = ?",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let raw_price: String = row.try_get("price")?;
    let price = raw_price
        .parse()
        .map_err(|e| RepoError::Database(format!("Corrupt price value: {e}")))?;

    Ok(Some(RecipeAggregate {
        recipe: row.try_get("title")?,
        no_of_tags: row.try_get("tag_count")?,
        no_of_ingredients: row.try_get("ingredient_count")?,
        price,
    }))
}

// ========== Associations ==========

/// Tag ids per recipe, for building list responses in one query
pub async fn tag_ids_by_recipe(
    pool: &SqlitePool,
    recipe_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<i64>>> {
    link_ids_by_recipe(pool, recipe_ids, "recipe_tag", "tag_id").await
}

/// Ingredient ids per recipe, for building list responses in one query
pub async fn ingredient_ids_by_recipe(
    pool: &SqlitePool,
    recipe_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<i64>>> {
    link_ids_by_recipe(pool, recipe_ids, "recipe_ingredient", "ingredient_id").await
}

async fn link_ids_by_recipe(
    pool: &SqlitePool,
    recipe_ids: &[i64],
    table: &str,
    column: &str,
) -> RepoResult<HashMap<i64, Vec<i64>>> {
    let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
    if recipe_ids.is_empty() {
        return Ok(map);
    }

    let sql = format!(
        "SELECT recipe_id, {column} FROM {table} WHERE recipe_id IN ({}) ORDER BY {column}",
        id_list_sql(recipe_ids)
    );
    let rows: Vec<(i64, i64)> = sqlx::query_as(&sql).fetch_all(pool).await?;

    for (recipe_id, linked_id) in rows {
        map.entry(recipe_id).or_default().push(linked_id);
    }
    Ok(map)
}

/// Full tag objects linked to a recipe (detail responses)
pub async fn tags_for(pool: &SqlitePool, recipe_id: i64) -> RepoResult<Vec<Tag>> {
    let rows = sqlx::query_as::<_, Tag>(
        "SELECT t.id, t.user_id, t.name FROM recipe_tag rt \
         INNER JOIN tag t ON t.id = rt.tag_id WHERE rt.recipe_id = ? ORDER BY t.id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Full ingredient objects linked to a recipe (detail responses)
pub async fn ingredients_for(pool: &SqlitePool, recipe_id: i64) -> RepoResult<Vec<Ingredient>> {
    let rows = sqlx::query_as::<_, Ingredient>(
        "SELECT i.id, i.user_id, i.name FROM recipe_ingredient ri \
         INNER JOIN ingredient i ON i.id = ri.ingredient_id WHERE ri.recipe_id = ? ORDER BY i.id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

async fn replace_tag_links(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: i64,
    tag_ids: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM recipe_tag WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut **tx)
        .await?;
    for tag_id in tag_ids {
        sqlx::query("INSERT OR IGNORE INTO recipe_tag (recipe_id, tag_id) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn replace_ingredient_links(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: i64,
    ingredient_ids: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM recipe_ingredient WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut **tx)
        .await?;
    for ingredient_id in ingredient_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO recipe_ingredient (recipe_id, ingredient_id) VALUES (?, ?)",
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
