//! # Request Extraction & Validation
//!
//! Handlers take `Result<Json<T>, JsonRejection>` and pass it through
//! [`extract_validated_json`]: unreadable bodies become 400s, rule
//! violations 422s.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::{AppError, InvalidField};

/// Request types that check rules serde cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), InvalidField>;
}

pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = result.map_err(|err| AppError::MalformedBody(err.body_text()))?;
    value.validate().map_err(AppError::InvalidField)?;
    Ok(value)
}
