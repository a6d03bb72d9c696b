use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    FormFields, UuidPath,
    errors::responses::{
        BadRequestDatabaseResponse, BadRequestFormResponse, BadRequestUuidResponse,
        BadRequestValidationResponse, NotFoundResponse,
    },
};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ThingResult;
use crate::models::{
    CreateThing, MessageResponse, Thing, ThingCreated, ThingEnvelope, ThingUpdated, UpdateThing,
};
use crate::repository::ThingRepository;
use crate::service::ThingService;

/// OpenAPI documentation for the Things API
#[derive(OpenApi)]
#[openapi(
    paths(list_things, create_thing, get_thing, update_thing, delete_thing),
    components(
        schemas(
            Thing,
            CreateThing,
            UpdateThing,
            ThingCreated,
            ThingEnvelope,
            ThingUpdated,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestFormResponse,
            BadRequestDatabaseResponse
        )
    ),
    tags(
        (name = "Things", description = "Thing management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the things router with all HTTP endpoints
pub fn router<R: ThingRepository + 'static>(service: ThingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_things).post(create_thing))
        .route(
            "/{id}",
            get(get_thing).patch(update_thing).delete(delete_thing),
        )
        .with_state(shared_service)
}

/// List every thing
#[utoipa::path(
    get,
    path = "",
    tag = "Things",
    responses(
        (status = 200, description = "All things, without the version field", body = Vec<Thing>),
        (status = 400, response = BadRequestDatabaseResponse)
    )
)]
async fn list_things<R: ThingRepository>(
    State(service): State<Arc<ThingService<R>>>,
) -> ThingResult<Json<Vec<Thing>>> {
    let things = service.list_things().await?;
    Ok(Json(things))
}

/// Create a thing from JSON, urlencoded or multipart (text only) fields
#[utoipa::path(
    post,
    path = "",
    tag = "Things",
    request_body(
        content(
            (CreateThing = "application/json"),
            (CreateThing = "application/x-www-form-urlencoded"),
            (CreateThing = "multipart/form-data")
        )
    ),
    responses(
        (status = 201, description = "Thing created", body = ThingCreated),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn create_thing<R: ThingRepository>(
    State(service): State<Arc<ThingService<R>>>,
    FormFields(fields): FormFields,
) -> ThingResult<impl IntoResponse> {
    let input: CreateThing = serde_json::from_value(Value::Object(fields))?;
    let thing = service.create_thing(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ThingCreated {
            message: "Object created !".to_string(),
            thing,
        }),
    ))
}

/// Get a thing by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Things",
    params(
        ("id" = Uuid, Path, description = "Thing ID")
    ),
    responses(
        (status = 200, description = "Thing found", body = ThingEnvelope),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_thing<R: ThingRepository>(
    State(service): State<Arc<ThingService<R>>>,
    UuidPath(id): UuidPath,
) -> ThingResult<Json<ThingEnvelope>> {
    let thing = service.get_thing(id).await?;
    Ok(Json(ThingEnvelope { thing }))
}

/// Partially update a thing
///
/// Unknown fields are stored as sent; `_id`, `__v`, `createdAt` and
/// `updatedAt` are ignored.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Things",
    params(
        ("id" = Uuid, Path, description = "Thing ID")
    ),
    request_body(
        content(
            (UpdateThing = "application/json"),
            (UpdateThing = "application/x-www-form-urlencoded"),
            (UpdateThing = "multipart/form-data")
        )
    ),
    responses(
        (status = 200, description = "Thing updated", body = ThingUpdated),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_thing<R: ThingRepository>(
    State(service): State<Arc<ThingService<R>>>,
    UuidPath(id): UuidPath,
    FormFields(fields): FormFields,
) -> ThingResult<Json<ThingUpdated>> {
    let input: UpdateThing = serde_json::from_value(Value::Object(fields))?;
    let thing = service.update_thing(id, input).await?;

    Ok(Json(ThingUpdated {
        message: "Object updated successfully".to_string(),
        thing,
    }))
}

/// Delete a thing
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Things",
    params(
        ("id" = Uuid, Path, description = "Thing ID")
    ),
    responses(
        (status = 200, description = "Thing deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_thing<R: ThingRepository>(
    State(service): State<Arc<ThingService<R>>>,
    UuidPath(id): UuidPath,
) -> ThingResult<Json<MessageResponse>> {
    service.delete_thing(id).await?;

    Ok(Json(MessageResponse {
        message: format!("Object {id} deleted successfully"),
    }))
}
