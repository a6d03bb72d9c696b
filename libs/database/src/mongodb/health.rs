use mongodb::Client;
use mongodb::bson::doc;
use std::time::{Duration, Instant};

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    pub response_time: Duration,
}

/// Run `{ ping: 1 }` against the admin database.
pub(crate) async fn ping(client: &Client) -> mongodb::error::Result<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}

/// Whether the server currently answers a ping.
pub async fn check_health(client: &Client) -> bool {
    ping(client).await.is_ok()
}

/// Ping with timing and the error message, if any.
///
/// # Example
/// ```ignore
/// let status = check_health_detailed(&client).await;
/// if !status.healthy {
///     tracing::warn!(message = ?status.message, "MongoDB unhealthy");
/// }
/// ```
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = ping(client).await;

    HealthStatus {
        healthy: result.is_ok(),
        message: result.err().map(|e| e.to_string()),
        response_time: start.elapsed(),
    }
}
