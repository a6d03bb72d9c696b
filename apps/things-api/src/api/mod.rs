//! API routes, nested under `/api` by `axum_helpers::create_router`.

pub mod health;
pub mod things;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/things", things::router(state))
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::server::ServerConfig;
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use mongodb::options::ClientOptions;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn unreachable_state() -> AppState {
        let mut options = ClientOptions::parse("mongodb://127.0.0.1:1").await.unwrap();
        options.server_selection_timeout = Some(Duration::from_millis(200));
        let mongo_client = mongodb::Client::with_options(options).unwrap();

        AppState {
            config: Config {
                app: core_config::app_info!(),
                mongodb: MongoConfig::default(),
                server: ServerConfig::default(),
                environment: Environment::Development,
                collection: "things".to_string(),
            },
            db: mongo_client.database("things"),
            mongo_client,
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ready_is_503_without_mongodb() {
        let app = Router::new().nest("/api", routes(&unreachable_state().await));

        let (status, body) = get(app, "/api/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["mongodb"], "disconnected");
    }

    #[tokio::test]
    async fn test_things_routes_are_mounted() {
        let app = Router::new().nest("/api", routes(&unreachable_state().await));

        let (status, body) = get(app, "/api/things/not-a-uuid").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_UUID");
    }
}
