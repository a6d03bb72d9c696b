//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that runs MongoDB in a container for the
//! lifetime of a test.

use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let db = mongo.database("things_test");
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a MongoDB 7 container and connect to it.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7.0")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = database::mongodb::connect(&connection_string)
            .await
            .expect("Failed to connect to MongoDB");

        tracing::info!(port = host_port, "Test MongoDB ready (mongo 7.0)");

        Self {
            container,
            client,
            connection_string,
        }
    }

    /// Cloned client, cheap to hand to repositories
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// A database on the test server; each test should use its own name
    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{Document, doc};

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_mongo_insert_find() {
        let mongo = TestMongo::new().await;
        let collection = mongo.database("test_utils").collection::<Document>("docs");

        collection.insert_one(doc! { "_id": "a", "n": 1 }).await.unwrap();

        let found = collection.find_one(doc! { "_id": "a" }).await.unwrap().unwrap();
        assert_eq!(found.get_i32("n").unwrap(), 1);
    }

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_mongo_health_check() {
        let mongo = TestMongo::new().await;
        let status = database::mongodb::check_health_detailed(&mongo.client()).await;
        assert!(status.healthy);
    }
}
