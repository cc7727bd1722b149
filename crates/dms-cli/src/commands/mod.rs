//! CLI command definitions and dispatch.

pub mod delete;
pub mod documents;
pub mod list;
pub mod migrate;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::output::OutputFormat;
use dms_core::config::AppConfig;
use dms_core::error::AppError;
use dms_core::types::UserId;
use dms_database::DatabasePool;
use dms_database::repositories::{
    AccessLogRepository, DocumentMasterRepository, DocumentRepository, ListingRepository,
};
use dms_service::{
    AccessLogService, DeleteService, DocumentService, ListService, ListingCatalog,
    RequestContext, UploadService, UploadValidator,
};
use dms_storage::LocalStorageProvider;

/// DMS: document upload, lookup, and listing
#[derive(Debug, Parser)]
#[command(name = "dms", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// User recorded as the author of changes
    #[arg(short, long, default_value_t = 1)]
    pub user: i64,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Upload a file as a document
    Upload(upload::UploadArgs),
    /// Soft-delete a document and remove its file
    Delete(delete::DeleteArgs),
    /// Paginated listing of a table
    List(list::ListArgs),
    /// Active documents of one reference
    Documents(documents::DocumentsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let db = create_db_pool(config).await?;
        debug!(command = ?self.command, format = ?self.format, "Dispatching command");
        let result = match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &db, config).await,
            Commands::Upload(args) => {
                let services = Services::build(config, &db)?;
                upload::execute(args, &services, &self.context("upload"), self.format).await
            }
            Commands::Delete(args) => {
                let services = Services::build(config, &db)?;
                delete::execute(args, &services, &self.context("delete"), self.format).await
            }
            Commands::List(args) => {
                let services = Services::build(config, &db)?;
                list::execute(args, &services, self.format).await
            }
            Commands::Documents(args) => {
                let services = Services::build(config, &db)?;
                documents::execute(args, &services, self.format).await
            }
        };
        db.close().await;
        result
    }

    fn context(&self, command: &str) -> RequestContext {
        RequestContext::new(UserId::new(self.user), format!("cli://{command}"), "CLI")
    }
}

/// Every service, wired to one pool and the configured storage root.
pub struct Services {
    pub uploads: UploadService,
    pub deletes: DeleteService,
    pub documents: DocumentService,
    pub listing: ListService,
    pub access_log: AccessLogService,
}

impl Services {
    fn build(config: &AppConfig, db: &DatabasePool) -> Result<Self, AppError> {
        let pool = db.pool().clone();
        let storage = Arc::new(LocalStorageProvider::new(&config.storage.default_root));
        let documents = Arc::new(DocumentRepository::new(pool.clone()));
        let masters = Arc::new(DocumentMasterRepository::new(pool.clone()));

        Ok(Self {
            uploads: UploadService::new(
                documents.clone(),
                UploadValidator::new(masters),
                storage.clone(),
                config.storage.clone(),
            ),
            deletes: DeleteService::new(documents.clone(), storage),
            documents: DocumentService::new(documents),
            listing: ListService::new(
                Arc::new(ListingRepository::new(pool.clone())),
                ListingCatalog::load()?,
                config.listing.clone(),
            ),
            access_log: AccessLogService::new(Arc::new(AccessLogRepository::new(pool))),
        })
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
