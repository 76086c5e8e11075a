//! Ingredient API handlers

use axum::{
    Json,
    extract::{Extension, Query, State},
};
use http::StatusCode;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Ingredient, IngredientCreate};
use crate::db::repository::ingredient;
use crate::utils::{AppResult, validation};

#[derive(serde::Deserialize)]
pub struct ListParams {
    pub assigned_only: Option<String>,
}

/// GET /ingredients - ingredients owned by the caller, newest names first
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Ingredient>>> {
    let assigned_only =
        validation::parse_bool_flag(params.assigned_only.as_deref(), "assigned_only")?;
    let ingredients =
        ingredient::list_by_owner(&state.pool, current_user.id, assigned_only).await?;
    Ok(Json(ingredients))
}

/// POST /ingredients - create an ingredient for the caller
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<IngredientCreate>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    let created = ingredient::create(&state.pool, current_user.id, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
