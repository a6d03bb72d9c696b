//! Things API routes

use axum::Router;
use domain_things::{MongoThingRepository, ThingService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoThingRepository::with_collection(state.db.clone(), &state.config.collection);
    let service = ThingService::new(repository);

    handlers::router(service)
}
