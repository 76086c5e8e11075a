//! Authentication
//!
//! JWT token issuance/validation and the axum middleware that guards
//! authenticated routes.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
