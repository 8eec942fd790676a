//! Apply schema migrations to the billing database.

use tracing::info;

use tillpoint_billing::db;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::open_pool().await?;

    info!("Running billing migrations");
    db::MIGRATOR.run(&pool).await?;
    info!("Migrations complete");

    Ok(())
}
