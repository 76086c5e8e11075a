//! Authentication middleware
//!
//! Axum middleware enforcing JWT authentication on every route except
//! the public allowlist.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Routes reachable without a token
fn is_public_route(method: &http::Method, path: &str) -> bool {
    if path == "/health" || path.starts_with("/uploads/") {
        return true;
    }
    method == http::Method::POST && (path == "/users/create" || path == "/users/token")
}

/// Authentication middleware - requires a logged-in user
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`.
/// On success a [`CurrentUser`] is injected into request extensions.
///
/// # Errors
///
/// | Failure | Status |
/// |---------|--------|
/// | Missing Authorization header | 401 Unauthorized |
/// | Expired token | 401 TokenExpired |
/// | Invalid token | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Allow CORS preflight through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
        }
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Request without credentials");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token rejected");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public_route(&http::Method::POST, "/users/create"));
        assert!(is_public_route(&http::Method::POST, "/users/token"));
        assert!(is_public_route(&http::Method::GET, "/health"));
        assert!(is_public_route(&http::Method::GET, "/uploads/recipe/x.png"));
    }

    #[test]
    fn test_protected_routes() {
        assert!(!is_public_route(&http::Method::GET, "/users/me"));
        assert!(!is_public_route(&http::Method::GET, "/recipe/tags"));
        assert!(!is_public_route(&http::Method::GET, "/users/create"));
        assert!(!is_public_route(&http::Method::POST, "/recipe/recipes"));
    }
}
