//! Schema migration runner.

use sqlx::PgPool;
use tracing::info;

use dms_core::error::{AppError, ErrorKind};

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Applying schema migrations");

    let migrator = sqlx::migrate!("../../migrations");
    let known = migrator.iter().count();

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to apply migrations: {e}"),
            e,
        )
    })?;

    info!(migrations = known, "Schema is up to date");
    Ok(())
}
