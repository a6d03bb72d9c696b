//! UUID path parameter extractor.

use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Extractor for a single UUID path parameter.
///
/// A value that does not parse as a UUID is rejected with
/// 400 `INVALID_UUID` before the handler runs.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::UuidPath;
///
/// async fn get_thing(UuidPath(id): UuidPath) -> String {
///     format!("Thing {id}")
/// }
///
/// let app: Router = Router::new().route("/things/{id}", get(get_thing));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Uuid::parse_str(&id).map(UuidPath).map_err(|_| {
            tracing::info!(id = %id, "Rejected malformed id");
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid UUID: {id}"),
                ErrorCode::InvalidUuid,
            )
        })
    }
}
