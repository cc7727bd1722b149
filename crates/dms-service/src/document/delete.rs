//! Soft-delete pipeline.
//!
//! The record is marked inside an open transaction, the file is removed,
//! and only then is the transaction committed. A removal failure rolls the
//! mark back so the record stays active and still points at its file.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use validator::Validate;

use dms_core::error::{AppError, ErrorKind};
use dms_core::result::AppResult;
use dms_core::traits::StorageProvider;
use dms_core::types::{DocumentId, EnvironmentId, ModuleId};
use dms_database::store::DocumentStore;
use dms_entity::document::DocumentLocator;

use crate::context::RequestContext;

/// Message for any missing required delete field.
pub const MISSING_DELETE_FIELDS: &str =
    "Missing required fields: id, module, application_id, reference_id, or filepath.";

const NOT_FOUND: &str = "Document not found or already deleted.";

/// Identifies the document to delete.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteRequest {
    /// Document id.
    pub id: DocumentId,
    /// Owning module.
    pub module_id: ModuleId,
    /// Owning environment.
    pub env_id: EnvironmentId,
    /// Caller-side reference.
    #[validate(length(min = 1))]
    pub ref_id: String,
    /// Path the caller believes the file is stored at.
    #[validate(length(min = 1))]
    pub filepath: String,
}

impl DeleteRequest {
    fn locator(&self) -> DocumentLocator {
        DocumentLocator {
            id: self.id,
            module_id: self.module_id,
            env_id: self.env_id,
            ref_id: self.ref_id.trim().to_string(),
        }
    }
}

/// Soft-deletes document records and removes their files.
#[derive(Clone)]
pub struct DeleteService {
    documents: Arc<dyn DocumentStore>,
    storage: Arc<dyn StorageProvider>,
}

impl std::fmt::Debug for DeleteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteService")
            .field("storage", &self.storage.provider_type())
            .finish()
    }
}

impl DeleteService {
    /// Creates a new delete service.
    pub fn new(documents: Arc<dyn DocumentStore>, storage: Arc<dyn StorageProvider>) -> Self {
        Self { documents, storage }
    }

    /// Delete one active document.
    ///
    /// Returns a not-found error when no active record matches, including
    /// when it was already deleted or is stored under a different path.
    /// A file that is already gone from disk is tolerated.
    pub async fn delete(&self, ctx: &RequestContext, request: &DeleteRequest) -> AppResult<()> {
        request.validate().map_err(|e| {
            AppError::with_source(ErrorKind::Validation, MISSING_DELETE_FIELDS, e)
        })?;
        if request.id.get() == 0 || request.filepath.trim().is_empty() {
            return Err(AppError::validation(MISSING_DELETE_FIELDS));
        }

        let pending = self
            .documents
            .begin_soft_delete(&request.locator(), ctx.user_id)
            .await
            .map_err(database_failure)?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

        let stored_path = normalize_path(&pending.document().filepath);
        if stored_path != normalize_path(request.filepath.trim()) {
            warn!(
                document_id = %request.id,
                "Delete request path does not match stored path"
            );
            pending.rollback().await.map_err(database_failure)?;
            return Err(AppError::not_found(NOT_FOUND));
        }

        match self.storage.delete(&stored_path).await {
            Ok(removed) => {
                if !removed {
                    warn!(path = %stored_path, "Stored file already missing");
                }
            }
            Err(e) => {
                error!(path = %stored_path, error = %e, "Failed to remove file, keeping record");
                pending.rollback().await.map_err(database_failure)?;
                return Err(AppError::internal(format!(
                    "Unexpected error during deletion: {}",
                    e.message
                )));
            }
        }

        pending.commit().await.map_err(database_failure)?;

        info!(
            user_id = %ctx.user_id,
            document_id = %request.id,
            path = %stored_path,
            "Document deleted"
        );
        Ok(())
    }
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn database_failure(e: AppError) -> AppError {
    AppError::internal(format!("Database error during deletion: {}", e.message))
}
