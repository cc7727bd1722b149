//! Document repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use dms_core::error::{AppError, ErrorKind};
use dms_core::result::AppResult;
use dms_core::types::{EnvironmentId, ModuleId, UserId};
use dms_entity::document::{CreateDocument, Document, DocumentLocator, DocumentSummary};

use crate::store::{DocumentStore, SoftDeletion};

/// Repository for `ds_document` rows.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn insert(&self, data: &CreateDocument) -> AppResult<Document> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let document = sqlx::query_as::<_, Document>(
            "INSERT INTO ds_document \
             (env_id, parent_id, ref_id, module_id, type, filename, original_filename, \
              filepath, filesize, extension, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(data.env_id)
        .bind(&data.parent_id)
        .bind(&data.ref_id)
        .bind(data.module_id)
        .bind(&data.doc_type)
        .bind(&data.filename)
        .bind(&data.original_filename)
        .bind(&data.filepath)
        .bind(data.filesize)
        .bind(&data.extension)
        .bind(data.created_by)
        .bind(data.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert document", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit document insert", e)
        })?;

        debug!(document_id = %document.id, "Document row inserted");
        Ok(document)
    }

    async fn begin_soft_delete(
        &self,
        locator: &DocumentLocator,
        deleted_by: UserId,
    ) -> AppResult<Option<Box<dyn SoftDeletion>>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let marked = sqlx::query_as::<_, Document>(
            "UPDATE ds_document SET deleted = TRUE, updated_by = $5, updated_at = NOW() \
             WHERE id = $1 AND module_id = $2 AND env_id = $3 AND ref_id = $4 \
             AND deleted = FALSE RETURNING *",
        )
        .bind(locator.id)
        .bind(locator.module_id)
        .bind(locator.env_id)
        .bind(&locator.ref_id)
        .bind(deleted_by)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark document deleted", e)
        })?;

        Ok(marked.map(|document| Box::new(PgSoftDeletion { tx, document }) as Box<dyn SoftDeletion>))
    }

    async fn list_by_reference(
        &self,
        module_id: ModuleId,
        env_id: EnvironmentId,
        ref_id: &str,
    ) -> AppResult<Vec<DocumentSummary>> {
        sqlx::query_as::<_, DocumentSummary>(
            "SELECT id, ref_id, type, original_filename, filename, filepath, filesize, \
             extension, created_at, status FROM ds_document \
             WHERE module_id = $1 AND env_id = $2 AND ref_id = $3 AND deleted = FALSE \
             ORDER BY id",
        )
        .bind(module_id)
        .bind(env_id)
        .bind(ref_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }
}

/// Soft delete held open in a PostgreSQL transaction.
struct PgSoftDeletion {
    tx: Transaction<'static, Postgres>,
    document: Document,
}

#[async_trait]
impl SoftDeletion for PgSoftDeletion {
    fn document(&self) -> &Document {
        &self.document
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit document delete", e)
        })
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tx.rollback().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to roll back document delete", e)
        })
    }
}
