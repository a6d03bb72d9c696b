//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Things API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for managing things",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/things", api = domain_things::ApiDoc)
    ),
    tags(
        (name = "Things", description = "Thing management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
