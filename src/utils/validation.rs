//! Input validation helpers
//!
//! Centralized text length constants, validation functions and query
//! parameter parsing. SQLite TEXT has no built-in length enforcement,
//! so limits are applied here.

use crate::utils::AppError;

// ========== Text length limits ==========

/// Entity names: tag, ingredient, recipe title
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length at registration
pub const MIN_PASSWORD_LEN: usize = 5;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ========== Validation helpers ==========

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::field_validation(
            field,
            format!("{field} must not be empty"),
        ));
    }
    if value.len() > max_len {
        return Err(AppError::field_validation(
            field,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::field_validation(
            field,
            format!("{field} is too long ({} chars, max {max_len})", v.len()),
        ));
    }
    Ok(())
}

/// Validate an email address: non-empty, plausible shape, lowercased by caller.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let (local, domain) = value
        .split_once('@')
        .ok_or_else(|| AppError::field_validation("email", "Enter a valid email address"))?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::field_validation(
            "email",
            "Enter a valid email address",
        ));
    }
    Ok(())
}

// ========== Query parameter parsing ==========

/// Parse a comma-separated id list (`"1,2,3"`).
///
/// Any non-integer entry fails the whole request rather than being
/// silently dropped.
pub fn parse_id_list(raw: &str, param: &str) -> Result<Vec<i64>, AppError> {
    raw.split(',')
        .map(|part| {
            part.trim().parse::<i64>().map_err(|_| {
                AppError::field_validation(
                    param,
                    format!("'{}' is not a valid id", part.trim()),
                )
            })
        })
        .collect()
}

/// Parse a boolean query flag (`assigned_only=1`).
///
/// Accepts `1/0/true/false`; anything else is a validation error.
pub fn parse_bool_flag(raw: Option<&str>, param: &str) -> Result<bool, AppError> {
    match raw {
        None => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some("0") | Some("false") => Ok(false),
        Some(other) => Err(AppError::field_validation(
            param,
            format!("'{other}' is not a valid boolean flag"),
        )),
    }
}
