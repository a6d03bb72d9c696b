//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "userId": [{
                "code": "alphanumeric",
                "message": "userId must contain only letters and digits",
                "params": {"value": "user-1"}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "error": "INVALID_UUID",
        "message": "Invalid UUID: not-an-id"
    })
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Unreadable body",
    content_type = "application/json",
    example = json!({
        "code": 1013,
        "error": "INVALID_FORM",
        "message": "file uploads are not accepted"
    })
)]
pub struct BadRequestFormResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Storage rejected the operation",
    content_type = "application/json",
    example = json!({
        "code": 2003,
        "error": "DATABASE_ERROR",
        "message": "Kind: I/O error: connection refused"
    })
)]
pub struct BadRequestDatabaseResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Object not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
