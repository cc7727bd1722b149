//! Document-type configuration repository.

use async_trait::async_trait;
use sqlx::PgPool;

use dms_core::error::{AppError, ErrorKind};
use dms_core::result::AppResult;
use dms_core::types::{EnvironmentId, ModuleId};
use dms_entity::document_master::{ACTIVE_STATUS, DocumentMaster};

use crate::store::DocumentMasterStore;

/// Read-only repository for `ds_document_master`.
#[derive(Debug, Clone)]
pub struct DocumentMasterRepository {
    pool: PgPool,
}

impl DocumentMasterRepository {
    /// Create a new repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentMasterStore for DocumentMasterRepository {
    async fn find_active(
        &self,
        env_id: EnvironmentId,
        module_id: ModuleId,
        doc_type: &str,
    ) -> AppResult<Option<DocumentMaster>> {
        sqlx::query_as::<_, DocumentMaster>(
            "SELECT id, env_id, module_id, type, allowed_extension, allowed_max_size, \
             filepath, status, deleted FROM ds_document_master \
             WHERE env_id = $1 AND module_id = $2 AND type = $3 \
             AND deleted = FALSE AND status = $4 \
             ORDER BY id LIMIT 1",
        )
        .bind(env_id)
        .bind(module_id)
        .bind(doc_type)
        .bind(ACTIVE_STATUS)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to load document type configuration",
                e,
            )
        })
    }
}
