use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::{ErrorDto, FieldErrorDto};

/// A single invalid request field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Request payload failed validation on one or more fields.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Creates a validation error for a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }
}

/// Converts validation errors into 422 Unprocessable Entity responses listing each field.
impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let errors = self
            .errors
            .into_iter()
            .map(|e| FieldErrorDto {
                field: e.field,
                message: e.message,
            })
            .collect();

        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorDto {
                success: false,
                message: "Validation failed".to_string(),
                errors: Some(errors),
            }),
        )
            .into_response()
    }
}
