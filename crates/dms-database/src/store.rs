//! Persistence seams consumed by the service layer.
//!
//! Each trait has one PostgreSQL implementation in [`crate::repositories`].
//! Services hold them as `Arc<dyn ...>` so tests can substitute in-memory
//! stores.

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::{Map, Value};

use dms_core::result::AppResult;
use dms_core::types::{EnvironmentId, ModuleId, UserId};
use dms_entity::access_log::{AccessLogEntry, CreateAccessLogEntry};
use dms_entity::document::{CreateDocument, Document, DocumentLocator, DocumentSummary};
use dms_entity::document_master::DocumentMaster;

use crate::query::QueryParam;

/// Document metadata persistence.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug + 'static {
    /// Insert a record in its own transaction and return it.
    async fn insert(&self, data: &CreateDocument) -> AppResult<Document>;

    /// Open a transaction and mark the matching active record deleted.
    ///
    /// Returns `None` when no active record matches the locator. The change
    /// is invisible to other connections until [`SoftDeletion::commit`].
    async fn begin_soft_delete(
        &self,
        locator: &DocumentLocator,
        deleted_by: UserId,
    ) -> AppResult<Option<Box<dyn SoftDeletion>>>;

    /// Active documents attached to one reference, oldest first.
    async fn list_by_reference(
        &self,
        module_id: ModuleId,
        env_id: EnvironmentId,
        ref_id: &str,
    ) -> AppResult<Vec<DocumentSummary>>;
}

/// An uncommitted soft delete.
///
/// Dropping it without calling either method rolls the change back.
#[async_trait]
pub trait SoftDeletion: Send {
    /// The record as marked, still holding its stored file path.
    fn document(&self) -> &Document;

    /// Make the delete durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discard the delete.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Document-type configuration lookup.
#[async_trait]
pub trait DocumentMasterStore: Send + Sync + Debug + 'static {
    /// The active, non-deleted configuration for one key.
    async fn find_active(
        &self,
        env_id: EnvironmentId,
        module_id: ModuleId,
        doc_type: &str,
    ) -> AppResult<Option<DocumentMaster>>;
}

/// Execution of built list queries.
#[async_trait]
pub trait ListStore: Send + Sync + Debug + 'static {
    /// Run a page SELECT and return each row as a JSON object.
    async fn fetch_rows(&self, sql: &str, params: &[QueryParam])
    -> AppResult<Vec<Map<String, Value>>>;

    /// Run a `SELECT COUNT(*)`.
    async fn count(&self, sql: &str, params: &[QueryParam]) -> AppResult<u64>;
}

/// Access log persistence.
#[async_trait]
pub trait AccessLogStore: Send + Sync + Debug + 'static {
    /// Append one entry.
    async fn create(&self, data: &CreateAccessLogEntry) -> AppResult<AccessLogEntry>;
}
