//! # API Error Types
//!
//! The simulator rejects a request only when its body is unusable. Anything
//! that goes wrong talking to the extension is reported inside a 200
//! [`crate::models::ExtensionResponse`] instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use utoipa::ToSchema;

/// Error body: `{"error": {"code", "message", "details"?}}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// `BAD_REQUEST` or `VALIDATION_ERROR`.
    pub code: String,
    pub message: String,
    /// For validation errors, the offending field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// A request field that failed a rule serde cannot express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub field: &'static str,
    pub message: String,
}

impl InvalidField {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// The body is not JSON or does not match the request shape (400).
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// A field broke a request rule (422).
    #[error("invalid {}: {}", .0.field, .0.message)]
    InvalidField(InvalidField),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MalformedBody(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::InvalidField(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            Self::MalformedBody(_) => None,
            Self::InvalidField(invalid) => Some(json!({ "field": invalid.field })),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        tracing::debug!(%status, error = %self, "request rejected");
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        (status, Json(body)).into_response()
    }
}
