//! User API handlers

use axum::{
    Json,
    extract::{Extension, State},
};
use http::StatusCode;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserPatch, UserResponse};
use crate::db::repository::user;
use crate::utils::{AppError, AppResult, validation};

#[derive(serde::Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(serde::Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /users/create - register a new account
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let email = normalize_email(&payload.email)?;
    validate_password(&payload.password)?;
    validation::validate_optional_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    let name = payload.name.unwrap_or_default();

    let password_hash = User::hash_password(&payload.password)?;
    let created = user::create(&state.pool, &email, &password_hash, &name).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

/// POST /users/token - exchange credentials for a JWT
pub async fn token(
    State(state): State<ServerState>,
    Json(payload): Json<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password must produce identical responses
    let found = user::find_by_email(&state.pool, &email).await?;
    let Some(account) = found else {
        return Err(AppError::invalid_credentials());
    };

    if !account.is_active || !account.verify_password(&payload.password)? {
        return Err(AppError::invalid_credentials());
    }

    let token = state.jwt_service.generate_token(account.id, &account.email)?;
    Ok(Json(TokenResponse { token }))
}

/// GET /users/me - profile of the authenticated user
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(UserResponse::from(account)))
}

/// PATCH /users/me - update own profile
pub async fn update_me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UserPatch>,
) -> AppResult<Json<UserResponse>> {
    validation::validate_optional_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    if let Some(name) = &payload.name {
        let updated = user::update_name(&state.pool, current_user.id, name).await?;
        return Ok(Json(UserResponse::from(updated)));
    }

    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(UserResponse::from(account)))
}

fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    validation::validate_email(&email)?;
    Ok(email)
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < validation::MIN_PASSWORD_LEN {
        return Err(AppError::field_validation(
            "password",
            format!(
                "password must be at least {} characters",
                validation::MIN_PASSWORD_LEN
            ),
        ));
    }
    if password.len() > validation::MAX_PASSWORD_LEN {
        return Err(AppError::field_validation(
            "password",
            "password is too long",
        ));
    }
    Ok(())
}
