//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use dms_core::config::AppConfig;
use dms_core::error::AppError;
use dms_core::traits::StorageProvider;
use dms_database::DatabasePool;
use dms_storage::LocalStorageProvider;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check that the database is reachable and the upload root is writable
    Check,
}

/// Execute migration commands
pub async fn execute(
    args: &MigrateArgs,
    db: &DatabasePool,
    config: &AppConfig,
) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            dms_database::migration::run_migrations(db.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Check => {
            db.ping().await?;
            output::print_success("Database is reachable.");

            let root = &config.storage.default_root;
            let storage = LocalStorageProvider::new(root);
            if !storage.health_check().await? {
                return Err(AppError::storage(format!(
                    "Upload root '{root}' cannot be created"
                )));
            }
            output::print_success(&format!("Upload root '{root}' is usable."));
        }
    }

    Ok(())
}
