pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Every error the API returns has this shape:
/// - `code`: integer error code for logging/monitoring (e.g., 1001)
/// - `error`: machine-readable identifier (e.g., "VALIDATION_ERROR")
/// - `message`: human-readable message
/// - `details`: optional structured details (e.g., per-field validation errors)
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Object not found",
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Errors raised by the shared extractors and reused by domain crates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Invalid form: {0}")]
    InvalidForm(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidForm(msg) => {
                tracing::info!(error_code = ErrorCode::InvalidForm.code(), "Invalid form: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidForm, msg)
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg)
            }
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

/// Flatten validator errors into `{ field: [{code, message, params}] }`.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}

/// Build an error response with an explicit status and code.
///
/// For cases where a domain maps an error to a status other than the one
/// [`AppError`] would choose.
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::BAD_REQUEST,
///     "write rejected by storage".to_string(),
///     ErrorCode::DatabaseError,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1))]
        title: String,
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("Object not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["code"], 1004);
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "Object not found");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_validation_details_lists_errors_per_field() {
        let errors = Payload {
            title: String::new(),
        }
        .validate()
        .unwrap_err();

        let details = validation_details(&errors);
        assert_eq!(details["title"][0]["code"], "length");
        assert!(details["title"][0]["params"]["min"].is_number());
    }

    #[tokio::test]
    async fn test_invalid_form_maps_to_400() {
        let response = AppError::InvalidForm("file uploads are not accepted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "INVALID_FORM");
        assert_eq!(body["message"], "file uploads are not accepted");
    }

    #[tokio::test]
    async fn test_error_response_uses_given_status() {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            "boom".to_string(),
            ErrorCode::DatabaseError,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], 2003);
    }
}
