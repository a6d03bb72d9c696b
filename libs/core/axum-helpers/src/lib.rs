//! # Axum Helpers
//!
//! Shared plumbing for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly with OpenAPI docs, health endpoints, graceful shutdown
//! - **[`http`]**: Security headers and CORS
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: `UuidPath` for ids, `FormFields` for JSON/form/multipart bodies
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router::<ApiDoc>(Router::new())?;
//!     create_app(router, &ServerConfig::default()).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_app, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, cors_layer_from_env, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, error_response};

pub use extractors::{FormFields, UuidPath};
