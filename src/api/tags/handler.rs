//! Tag API handlers

use axum::{
    Json,
    extract::{Extension, Query, State},
};
use http::StatusCode;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Tag, TagCreate};
use crate::db::repository::tag;
use crate::utils::{AppResult, validation};

#[derive(serde::Deserialize)]
pub struct ListParams {
    pub assigned_only: Option<String>,
}

/// GET /tags - tags owned by the caller, newest names first
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Tag>>> {
    let assigned_only =
        validation::parse_bool_flag(params.assigned_only.as_deref(), "assigned_only")?;
    let tags = tag::list_by_owner(&state.pool, current_user.id, assigned_only).await?;
    Ok(Json(tags))
}

/// POST /tags - create a tag for the caller
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<TagCreate>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    let created = tag::create(&state.pool, current_user.id, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
