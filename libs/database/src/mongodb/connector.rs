use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::{MongoConfig, health::ping};

/// Error type for MongoDB connection setup
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection timed out after {0:?}")]
    Timeout(Duration),
}

/// Connect using a MongoConfig and verify the deployment answers a ping.
///
/// Parsing the connection string (including SRV lookup), building the client
/// and the ping all share one deadline of `connect_timeout_secs`. There is no
/// retry: a failure here is meant to stop the process.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
/// use core_config::FromEnv;
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    let deadline = Duration::from_secs(config.connect_timeout_secs);
    info!(url = %config.redacted_url(), ?deadline, "Connecting to MongoDB");

    let client = tokio::time::timeout(deadline, connect_and_ping(config, deadline))
        .await
        .map_err(|_| MongoError::Timeout(deadline))??;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

async fn connect_and_ping(config: &MongoConfig, deadline: Duration) -> Result<Client, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.connect_timeout = Some(deadline);
    options.server_selection_timeout = Some(deadline);
    if let Some(max_pool_size) = config.max_pool_size {
        options.max_pool_size = Some(max_pool_size);
    }
    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    ping(&client)
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    Ok(client)
}
