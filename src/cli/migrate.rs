use crate::config::{BootstrapSettings, init_database, migrate_database};

/// Run database migrations
///
/// Connects and applies pending migrations without building the full AppData,
/// so secrets are not required.
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = init_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
