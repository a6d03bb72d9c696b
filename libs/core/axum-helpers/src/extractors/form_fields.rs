//! Field-map extractor accepting JSON, urlencoded and multipart bodies.

use crate::errors::AppError;
use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};

/// Request body read into a flat map of field name to value.
///
/// | Content-Type | Behavior |
/// |---|---|
/// | `application/json` (or `*+json`) | body must be a JSON object |
/// | `application/x-www-form-urlencoded` | a repeated key keeps the last value |
/// | `multipart/form-data` | text parts only, a part with a filename is rejected |
/// | absent | empty map |
/// | anything else | rejected |
///
/// Form and multipart values are always strings; JSON values keep their type.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::FormFields;
///
/// async fn create(FormFields(fields): FormFields) -> String {
///     format!("{} fields", fields.len())
/// }
/// ```
#[derive(Debug, Default)]
pub struct FormFields(pub Map<String, Value>);

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    UrlEncoded,
    Multipart,
    Empty,
    Unsupported(String),
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(content_type) = req.headers().get(CONTENT_TYPE) else {
        return BodyKind::Empty;
    };
    let content_type = content_type.to_str().unwrap_or_default();
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "application/json" => BodyKind::Json,
        "application/x-www-form-urlencoded" => BodyKind::UrlEncoded,
        "multipart/form-data" => BodyKind::Multipart,
        other if other.ends_with("+json") => BodyKind::Json,
        _ => BodyKind::Unsupported(content_type.to_string()),
    }
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Empty => Ok(FormFields::default()),
            BodyKind::Json => {
                let Json(value) = Json::<Value>::from_request(req, state).await?;
                match value {
                    Value::Object(map) => Ok(FormFields(map)),
                    _ => Err(AppError::BadRequest(
                        "request body must be a JSON object".to_string(),
                    )),
                }
            }
            BodyKind::UrlEncoded => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::InvalidForm(e.body_text()))?;

                let fields = pairs
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect();
                Ok(FormFields(fields))
            }
            BodyKind::Multipart => {
                let mut multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::InvalidForm(e.body_text()))?;

                let mut fields = Map::new();
                while let Some(field) = multipart
                    .next_field()
                    .await
                    .map_err(|e| AppError::InvalidForm(e.body_text()))?
                {
                    if field.file_name().is_some() {
                        return Err(AppError::InvalidForm(
                            "file uploads are not accepted".to_string(),
                        ));
                    }
                    let Some(name) = field.name().map(str::to_string) else {
                        continue;
                    };
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::InvalidForm(e.body_text()))?;
                    fields.insert(name, Value::String(text));
                }
                Ok(FormFields(fields))
            }
            BodyKind::Unsupported(content_type) => Err(AppError::InvalidForm(format!(
                "unsupported content type: {content_type}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{StatusCode, header},
        response::IntoResponse,
        routing::post,
    };
    use tower::ServiceExt;

    async fn echo(FormFields(fields): FormFields) -> impl IntoResponse {
        Json(Value::Object(fields))
    }

    async fn send(content_type: Option<&str>, body: impl Into<Body>) -> (StatusCode, Value) {
        let mut request = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }

        let response = Router::new()
            .route("/", post(echo))
            .oneshot(request.body(body.into()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_json_object_keeps_value_types() {
        let (status, body) = send(
            Some("application/json"),
            r#"{"title":"Lamp","price":12.5}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Lamp");
        assert_eq!(body["price"], 12.5);
    }

    #[tokio::test]
    async fn test_json_array_is_rejected() {
        let (status, body) = send(Some("application/json"), "[1, 2]").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_urlencoded_last_value_wins() {
        let (status, body) = send(
            Some("application/x-www-form-urlencoded"),
            "title=first&price=3&title=second",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "second");
        assert_eq!(body["price"], "3");
    }

    #[tokio::test]
    async fn test_multipart_text_parts_are_read() {
        let body = "--XBOUND\r\n\
            Content-Disposition: form-data; name=\"title\"\r\n\r\n\
            Lamp\r\n\
            --XBOUND\r\n\
            Content-Disposition: form-data; name=\"userId\"\r\n\r\n\
            abc123\r\n\
            --XBOUND--\r\n";

        let (status, body) = send(Some("multipart/form-data; boundary=XBOUND"), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Lamp");
        assert_eq!(body["userId"], "abc123");
    }

    #[tokio::test]
    async fn test_multipart_file_part_is_rejected() {
        let body = "--XBOUND\r\n\
            Content-Disposition: form-data; name=\"image\"; filename=\"lamp.png\"\r\n\
            Content-Type: image/png\r\n\r\n\
            PNGDATA\r\n\
            --XBOUND--\r\n";

        let (status, body) = send(Some("multipart/form-data; boundary=XBOUND"), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_FORM");
        assert_eq!(body["message"], "file uploads are not accepted");
    }

    #[tokio::test]
    async fn test_missing_content_type_yields_empty_map() {
        let (status, body) = send(None, Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_unsupported_content_type_is_rejected() {
        let (status, body) = send(Some("text/plain"), "title=Lamp").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_FORM");
    }
}
