//! Shared application state.

use database::mongodb::{Client, Database};

/// Cloned into every router that needs it; `Client` and `Database` are
/// handles over one shared connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}

#[cfg(test)]
impl AppState {
    /// State whose client points at a closed port, so every operation fails fast.
    pub async fn unreachable() -> Self {
        use crate::config::{Config, Environment};
        use core_config::{app_info, server::ServerConfig};
        use database::mongodb::MongoConfig;

        const UNREACHABLE: &str =
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200";

        // Client construction is lazy; nothing connects until the first operation.
        let mongo_client = Client::with_uri_str(UNREACHABLE).await.unwrap();
        Self {
            config: Config {
                app: app_info!(),
                mongodb: MongoConfig::new(UNREACHABLE),
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            db: mongo_client.database("youwont"),
            mongo_client,
        }
    }
}
