use mongodb::{Client, bson::doc};

/// Run the `ping` command against the `admin` database.
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect_from_config, ping};
///
/// let client = connect_from_config(&config).await?;
/// ping(&client).await?;
/// ```
pub async fn ping(client: &Client) -> Result<(), mongodb::error::Error> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}
