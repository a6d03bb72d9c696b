use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        database = config.mongodb.database(),
        collection = %config.collection,
        "Connected to MongoDB"
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;
    let app = router.merge(health_router(state.config.app));

    let shutdown_timeout = state.config.server.shutdown_timeout;
    info!(
        "Starting Things API (shutdown timeout {:?})",
        shutdown_timeout
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, shutdown_timeout, async move {
        info!("Shutting down: closing MongoDB connections");
        // The driver closes its pool on drop
        drop(state);
        info!("MongoDB connection closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Things API shutdown complete");
    Ok(())
}
