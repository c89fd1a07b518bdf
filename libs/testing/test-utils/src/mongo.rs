//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that runs a MongoDB container for testing.

use database::mongodb::{Client, Database, MongoConfig, connect_from_config};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let db = mongo.database("users_test");
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a MongoDB 8 container and connect to it.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("8")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}/?directConnection=true", host_port);

        let client = connect_from_config(
            &MongoConfig::new(connection_string.clone()).with_connect_timeout_secs(30),
        )
        .await
        .expect("Failed to connect to test MongoDB");

        tracing::info!(port = host_port, "Test MongoDB ready");

        Self {
            container,
            client,
            connection_string,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }
}
