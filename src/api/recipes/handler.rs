//! Recipe API handlers

use axum::{
    Json,
    extract::{Extension, Multipart, Path, Query, State},
};
use http::StatusCode;
use rust_decimal::Decimal;
use tracing::warn;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    Recipe, RecipeAggregate, RecipeCreate, RecipeDetail, RecipePatch, RecipeSummary,
};
use crate::db::repository::recipe::{self, RecipeFilter};
use crate::db::repository::{ingredient, tag};
use crate::utils::{AppError, AppResult, validation};

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(serde::Deserialize)]
pub struct ListParams {
    pub tags: Option<String>,
    pub ingredients: Option<String>,
}

/// GET /recipes - the caller's recipes, newest first, association ids inline
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<RecipeSummary>>> {
    let filter = RecipeFilter {
        tag_ids: parse_filter_list("tags", params.tags.as_deref())?,
        ingredient_ids: parse_filter_list("ingredients", params.ingredients.as_deref())?,
    };

    let recipes = recipe::list_by_owner(&state.pool, current_user.id, &filter).await?;

    let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
    let mut tag_map = recipe::tag_ids_by_recipe(&state.pool, &ids).await?;
    let mut ingredient_map = recipe::ingredient_ids_by_recipe(&state.pool, &ids).await?;

    let summaries = recipes
        .into_iter()
        .map(|r| {
            let tags = tag_map.remove(&r.id).unwrap_or_default();
            let ingredients = ingredient_map.remove(&r.id).unwrap_or_default();
            RecipeSummary::from_recipe(r, tags, ingredients)
        })
        .collect();

    Ok(Json(summaries))
}

/// POST /recipes - create a recipe owned by the caller
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<RecipeCreate>,
) -> AppResult<(StatusCode, Json<RecipeDetail>)> {
    validate_recipe_fields(&payload.title, payload.time_minutes, payload.price, &payload.link)?;
    validate_association_ids(&state, &payload.tags, &payload.ingredients).await?;

    let created = recipe::create(&state.pool, current_user.id, &payload).await?;
    let detail = load_detail(&state, created).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /recipes/:id - single recipe with nested tags and ingredients
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<RecipeDetail>> {
    let found = recipe::find_by_id_for_owner(&state.pool, id, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Recipe {} not found", id)))?;
    let detail = load_detail(&state, found).await?;
    Ok(Json(detail))
}

/// PUT /recipes/:id - full replace, omitted association arrays clear
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<RecipeCreate>,
) -> AppResult<Json<RecipeDetail>> {
    validate_recipe_fields(&payload.title, payload.time_minutes, payload.price, &payload.link)?;
    validate_association_ids(&state, &payload.tags, &payload.ingredients).await?;

    let updated = recipe::replace(&state.pool, id, current_user.id, &payload).await?;
    let detail = load_detail(&state, updated).await?;
    Ok(Json(detail))
}

/// PATCH /recipes/:id - partial update, omitted association arrays untouched
pub async fn patch(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<RecipePatch>,
) -> AppResult<Json<RecipeDetail>> {
    if let Some(title) = &payload.title {
        validation::validate_required_text(title, "title", validation::MAX_NAME_LEN)?;
    }
    if let Some(time_minutes) = payload.time_minutes {
        validate_time_minutes(time_minutes)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    validation::validate_optional_text(&payload.link, "link", validation::MAX_URL_LEN)?;
    validate_association_ids(
        &state,
        payload.tags.as_deref().unwrap_or_default(),
        payload.ingredients.as_deref().unwrap_or_default(),
    )
    .await?;

    let updated = recipe::patch(&state.pool, id, current_user.id, &payload).await?;
    let detail = load_detail(&state, updated).await?;
    Ok(Json(detail))
}

/// DELETE /recipes/:id - delete an owned recipe and its stored image file
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let found = recipe::find_by_id_for_owner(&state.pool, id, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Recipe {} not found", id)))?;

    recipe::delete(&state.pool, id, current_user.id).await?;

    if let Some(image) = &found.image {
        state.images.remove(image);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /recipes/:id/upload-image - attach an image via multipart field "image"
pub async fn upload_image(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<String>> {
    let existing = recipe::find_by_id_for_owner(&state.pool, id, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Recipe {} not found", id)))?;

    let mut upload: Option<(Vec<u8>, String)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let extension = field
            .file_name()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()))
            .ok_or_else(|| {
                AppError::field_validation("image", "file name must carry an image extension")
            })?;
        let data = field.bytes().await?;
        upload = Some((data.to_vec(), extension));
    }

    let Some((data, extension)) = upload else {
        return Err(AppError::field_validation("image", "no image file supplied"));
    };

    validate_image(&data, &extension)?;

    let stored = state.images.save_recipe_image(&data, &extension)?;
    recipe::set_image(&state.pool, id, current_user.id, &stored).await?;

    // The old file goes only after the new one is fully in place
    if let Some(previous) = &existing.image {
        state.images.remove(previous);
    }

    Ok(Json("image uploaded".to_string()))
}

/// GET /recipes/:id/get-aggregateData - counts of linked tags and ingredients
pub async fn aggregate(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<RecipeAggregate>> {
    let found = recipe::aggregate(&state.pool, id, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Recipe {} not found", id)))?;
    Ok(Json(found))
}

// ========== Validation ==========

fn parse_filter_list(field: &str, raw: Option<&str>) -> AppResult<Option<Vec<i64>>> {
    match raw {
        None => Ok(None),
        Some(value) => Ok(Some(validation::parse_id_list(value, field)?)),
    }
}

fn validate_recipe_fields(
    title: &str,
    time_minutes: i64,
    price: Decimal,
    link: &Option<String>,
) -> AppResult<()> {
    validation::validate_required_text(title, "title", validation::MAX_NAME_LEN)?;
    validate_time_minutes(time_minutes)?;
    validate_price(price)?;
    validation::validate_optional_text(link, "link", validation::MAX_URL_LEN)?;
    Ok(())
}

fn validate_time_minutes(time_minutes: i64) -> AppResult<()> {
    if time_minutes < 0 {
        return Err(AppError::field_validation(
            "time_minutes",
            "time_minutes must not be negative",
        ));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() {
        return Err(AppError::field_validation(
            "price",
            "price must not be negative",
        ));
    }
    Ok(())
}

/// Every referenced tag and ingredient id must exist; a dangling id
/// would otherwise surface as a foreign key failure deep in the
/// transaction.
async fn validate_association_ids(
    state: &ServerState,
    tag_ids: &[i64],
    ingredient_ids: &[i64],
) -> AppResult<()> {
    let distinct_tags = distinct(tag_ids);
    if !distinct_tags.is_empty() {
        let found = tag::count_by_ids(&state.pool, &distinct_tags).await?;
        if found != distinct_tags.len() as i64 {
            return Err(AppError::field_validation(
                "tags",
                "one or more tag ids do not exist",
            ));
        }
    }

    let distinct_ingredients = distinct(ingredient_ids);
    if !distinct_ingredients.is_empty() {
        let found = ingredient::count_by_ids(&state.pool, &distinct_ingredients).await?;
        if found != distinct_ingredients.len() as i64 {
            return Err(AppError::field_validation(
                "ingredients",
                "one or more ingredient ids do not exist",
            ));
        }
    }

    Ok(())
}

fn distinct(ids: &[i64]) -> Vec<i64> {
    let mut out: Vec<i64> = ids.to_vec();
    out.sort_unstable();
    out.dedup();
    out
}

fn validate_image(data: &[u8], extension: &str) -> AppResult<()> {
    if data.is_empty() {
        return Err(AppError::field_validation("image", "image file is empty"));
    }
    if data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::field_validation("image", "image file is too large"));
    }
    if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension) {
        return Err(AppError::field_validation(
            "image",
            format!("unsupported image extension: {}", extension),
        ));
    }
    if let Err(e) = image::load_from_memory(data) {
        warn!("Rejected image upload: {}", e);
        return Err(AppError::field_validation(
            "image",
            "file is not a valid image",
        ));
    }
    Ok(())
}

async fn load_detail(state: &ServerState, recipe_row: Recipe) -> AppResult<RecipeDetail> {
    let tags = recipe::tags_for(&state.pool, recipe_row.id).await?;
    let ingredients = recipe::ingredients_for(&state.pool, recipe_row.id).await?;
    Ok(RecipeDetail::from_recipe(recipe_row, tags, ingredients))
}
