//! Utility modules

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse};

/// Result alias used by API handlers
pub type AppResult<T> = Result<T, AppError>;
