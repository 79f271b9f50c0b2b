/// Document store connection management
///
/// This module connects to MongoDB and hands out the `Database` handle the
/// rest of the application shares. The driver manages its own connection
/// pool internally; the handle is cheap to clone and lives for the process
/// lifetime, with no explicit teardown.
///
/// # Example
///
/// ```no_run
/// use taskhub::config::DatabaseConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = DatabaseConfig {
///     url: "mongodb://localhost:27017".to_string(),
///     database: "taskhub".to_string(),
/// };
///
/// let db = taskhub::db::connect(&config).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::DatabaseConfig;
use mongodb::{bson::doc, Client, Database};
use tracing::{debug, info};

/// Connects to the document store and verifies it is reachable
///
/// The driver establishes connections lazily, so a `ping` is issued here to
/// fail fast at startup when the store is unreachable.
///
/// # Errors
///
/// Returns an error if:
/// - The connection URL is invalid
/// - The store does not respond to the ping
pub async fn connect(config: &DatabaseConfig) -> Result<Database, mongodb::error::Error> {
    info!(database = %config.database, "Connecting to document store");

    let client = Client::with_uri_str(&config.url).await?;
    let db = client.database(&config.database);

    health_check(&db).await?;

    info!("Document store connection established");
    Ok(db)
}

/// Performs a health check on the document store connection
///
/// # Errors
///
/// Returns an error if the ping command fails
pub async fn health_check(db: &Database) -> Result<(), mongodb::error::Error> {
    debug!("Performing document store health check");

    db.run_command(doc! { "ping": 1 }).await?;

    debug!("Document store health check passed");
    Ok(())
}
