// Request/response contracts and their field-level validation rules.
pub mod addresses;
pub mod contacts;
pub mod users;

use crate::error::ApiError;

/// Required string field: present, non-empty, bounded length
pub(crate) fn require(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::validation(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max {
        return Err(ApiError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Optional string field: absent is fine, present means non-empty and bounded
pub(crate) fn optional(field: &str, value: &Option<String>, max: usize) -> Result<(), ApiError> {
    match value {
        Some(v) => require(field, v, max),
        None => Ok(()),
    }
}

/// Minimal email shape check: something before and after a single '@'
pub(crate) fn email_format(field: &str, value: &str) -> Result<(), ApiError> {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ApiError::validation(format!(
            "{} must be a valid email address",
            field
        )));
    }
    Ok(())
}
