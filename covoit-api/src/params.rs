//! Query-string helpers shared by the resource handlers.

use uuid::Uuid;

use crate::error::AppError;

/// Treats `?key=` the same as an absent key.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty())
}

pub fn optional_id(name: &str, raw: Option<String>) -> Result<Option<Uuid>, AppError> {
    non_empty(raw)
        .map(|v| {
            Uuid::parse_str(v.trim())
                .map_err(|_| AppError::ValidationError(format!("invalid {}: '{}'", name, v)))
        })
        .transpose()
}

pub fn required_id(name: &str, raw: Option<String>) -> Result<Uuid, AppError> {
    optional_id(name, raw)?
        .ok_or_else(|| AppError::ValidationError(format!("missing {} query parameter", name)))
}
