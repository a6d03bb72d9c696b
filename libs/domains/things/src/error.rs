use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, ErrorCode, ErrorResponse, error_response, errors::validation_details};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ThingError {
    #[error("Thing not found: {0}")]
    NotFound(Uuid),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ThingResult<T> = Result<T, ThingError>;

impl IntoResponse for ThingError {
    fn into_response(self) -> Response {
        match self {
            ThingError::NotFound(_) => AppError::NotFound("Object not found".to_string()).into_response(),
            ThingError::Validation(errors) => validation_response(&errors),
            ThingError::InvalidInput(msg) => AppError::BadRequest(msg).into_response(),
            // Storage failures are reported as client errors on every resource route.
            ThingError::Database(msg) => {
                tracing::warn!(error_code = ErrorCode::DatabaseError.code(), "Database error: {}", msg);
                error_response(StatusCode::BAD_REQUEST, msg, ErrorCode::DatabaseError)
            }
        }
    }
}

/// Request field name for a struct field: `user_id` is sent as `userId`.
fn wire_name(field: &str) -> String {
    let mut parts = field.split('_');
    let mut name = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

/// Validation failures keyed by the names clients send, not the Rust field names.
fn validation_response(errors: &validator::ValidationErrors) -> Response {
    tracing::info!(
        error_code = ErrorCode::ValidationError.code(),
        "Validation error: {}",
        errors
    );

    let details = match validation_details(errors) {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(field, entries)| (wire_name(&field), entries))
                .collect(),
        ),
        other => other,
    };
    let body = ErrorResponse::new(
        ErrorCode::ValidationError,
        ErrorCode::ValidationError.default_message(),
    )
    .with_details(details);

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

impl From<mongodb::error::Error> for ThingError {
    fn from(err: mongodb::error::Error) -> Self {
        ThingError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for ThingError {
    fn from(err: serde_json::Error) -> Self {
        ThingError::InvalidInput(err.to_string())
    }
}
