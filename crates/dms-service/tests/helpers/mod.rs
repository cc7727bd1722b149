//! Shared helpers for database-backed integration tests.
//!
//! Tests run only when `DMS_TEST_DATABASE_URL` points at a disposable
//! PostgreSQL database; otherwise each test returns early.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use sqlx::PgPool;
use tempfile::TempDir;

use dms_core::config::{DatabaseConfig, ListingConfig, StorageConfig};
use dms_core::types::UserId;
use dms_database::DatabasePool;
use dms_database::migration::run_migrations;
use dms_database::repositories::{
    AccessLogRepository, DocumentMasterRepository, DocumentRepository, ListingRepository,
};
use dms_service::{
    AccessLogService, DeleteService, DocumentService, ListService, ListingCatalog,
    RequestContext, UploadService, UploadValidator,
};
use dms_storage::LocalStorageProvider;

static SEQUENCE: AtomicI64 = AtomicI64::new(0);

/// Services wired against a live database and a temporary upload root.
pub struct TestApp {
    pub pool: PgPool,
    pub uploads: UploadService,
    pub deletes: DeleteService,
    pub documents: DocumentService,
    pub listing: ListService,
    pub access_log: AccessLogService,
    pub upload_root: TempDir,
}

impl TestApp {
    /// Connect and migrate, or `None` when no test database is configured.
    pub async fn try_new() -> Option<Self> {
        let url = std::env::var("DMS_TEST_DATABASE_URL").ok()?;
        let db = DatabasePool::connect(&DatabaseConfig {
            url,
            max_connections: 4,
            min_connections: 1,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 60,
        })
        .await
        .expect("Failed to connect to test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let pool = db.pool().clone();
        let upload_root = tempfile::tempdir().expect("tempdir");
        let storage = Arc::new(LocalStorageProvider::new(upload_root.path()));
        let documents = Arc::new(DocumentRepository::new(pool.clone()));
        let masters = Arc::new(DocumentMasterRepository::new(pool.clone()));

        Some(Self {
            uploads: UploadService::new(
                documents.clone(),
                UploadValidator::new(masters),
                storage.clone(),
                StorageConfig {
                    default_root: upload_root.path().to_string_lossy().into_owned(),
                },
            ),
            deletes: DeleteService::new(documents.clone(), storage),
            documents: DocumentService::new(documents),
            listing: ListService::new(
                Arc::new(ListingRepository::new(pool.clone())),
                ListingCatalog::load().expect("catalog"),
                ListingConfig::default(),
            ),
            access_log: AccessLogService::new(Arc::new(AccessLogRepository::new(pool.clone()))),
            pool,
            upload_root,
        })
    }

    /// A request context for a test user.
    pub fn ctx(&self, method: &str) -> RequestContext {
        RequestContext::new(UserId::new(1), format!("/test/{method}"), method).with_ip("127.0.0.1")
    }

    /// Insert an active document-type configuration and return its module id.
    pub async fn seed_master(&self, env_id: i64, doc_type: &str, allowed: &str, max_kb: i64) -> i64 {
        let module_id = unique_number();
        sqlx::query(
            "INSERT INTO ds_document_master \
             (env_id, module_id, type, allowed_extension, allowed_max_size, status) \
             VALUES ($1, $2, $3, $4, $5, 'active')",
        )
        .bind(env_id)
        .bind(module_id)
        .bind(doc_type)
        .bind(allowed)
        .bind(max_kb)
        .execute(&self.pool)
        .await
        .expect("Failed to seed document master");
        module_id
    }

    /// Insert a user row.
    pub async fn seed_user(&self, username: &str) {
        sqlx::query("INSERT INTO ds_user (username, email) VALUES ($1, $2)")
            .bind(username)
            .bind(format!("{username}@example.com"))
            .execute(&self.pool)
            .await
            .expect("Failed to seed user");
    }
}

/// A number unique to this test run, usable as a module or environment id.
pub fn unique_number() -> i64 {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    (nanos / 1_000) % 1_000_000_000 * 100 + SEQUENCE.fetch_add(1, Ordering::SeqCst) % 100
}

/// A token unique to this test run, usable in text columns.
pub fn unique_token(prefix: &str) -> String {
    format!("{prefix}{}", unique_number())
}
