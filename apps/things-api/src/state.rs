//! Application state shared with the route builders.

use mongodb::{Client, Database};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares the underlying connection pool)
    pub mongo_client: Client,
    pub db: Database,
}
