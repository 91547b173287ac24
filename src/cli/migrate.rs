use crate::config::database::{connect, migrate};
use crate::config::WorkshopSettings;
use crate::errors::InternalError;

/// Connect to the configured database and apply all pending migrations
///
/// Does not build AppData.
pub async fn run_migrations(settings: &WorkshopSettings) -> Result<(), InternalError> {
    tracing::info!("Running database migrations...");

    let db = connect(&settings.database_url).await?;
    migrate(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
