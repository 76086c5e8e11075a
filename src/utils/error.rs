//! Unified error handling
//!
//! Provides the application error type and response structure:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API error/response body
//!
//! # Error code scheme
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx  | Request errors | E0002 validation failed |
//! | E2xxx  | Authorization | E2001 forbidden |
//! | E3xxx  | Authentication | E3001 not logged in |
//! | E9xxx  | System errors | E9002 database error |

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// API error body
///
/// ```json
/// {
///   "code": "E0002",
///   "message": "Validation failed",
///   "errors": { "name": ["name must not be empty"] }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse {
    pub code: String,
    pub message: String,
    /// Field-level validation messages (400 responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // ========== Authorization errors (403) ==========
    #[error("Forbidden: {0}")]
    Forbidden(String),

    // ========== Business logic errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Validation failure attributed to a specific field
    #[error("Validation failed: {field}: {message}")]
    FieldValidation { field: String, message: String },

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "E3001",
                "Authentication required".to_string(),
                None,
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "E3003",
                "Token expired".to_string(),
                None,
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "E3002",
                "Invalid token".to_string(),
                None,
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "E2001", msg.clone(), None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone(), None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone(), None),
            AppError::FieldValidation { field, message } => {
                let mut map = BTreeMap::new();
                map.insert(field.clone(), vec![message.clone()]);
                (
                    StatusCode::BAD_REQUEST,
                    "E0002",
                    "Validation failed".to_string(),
                    Some(map),
                )
            }
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(AppResponse {
            code: code.to_string(),
            message,
            errors,
        });

        (status, body).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Multipart error: {}", e))
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AppError::Internal(format!("Password hashing failed: {}", e))
    }
}

impl From<crate::auth::JwtError> for AppError {
    fn from(e: crate::auth::JwtError) -> Self {
        AppError::Internal(format!("Token generation failed: {}", e))
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn field_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FieldValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Unified credential failure, identical for unknown email and wrong
    /// password to prevent account enumeration
    pub fn invalid_credentials() -> Self {
        Self::Forbidden("Unable to authenticate with provided credentials".to_string())
    }
}
