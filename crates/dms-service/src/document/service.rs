//! Listing the documents attached to one reference.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use validator::Validate;

use dms_core::error::{AppError, ErrorKind};
use dms_core::result::AppResult;
use dms_core::types::{EnvironmentId, ModuleId};
use dms_database::store::DocumentStore;
use dms_entity::document::DocumentSummary;

/// Message for any missing required lookup field.
pub const MISSING_QUERY_FIELDS: &str =
    "Missing required fields: module, application_id, or reference_id";

/// The (module, environment, reference) triple to list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DocumentQuery {
    /// Owning module.
    #[validate(required)]
    pub module_id: Option<ModuleId>,
    /// Owning environment.
    #[validate(required)]
    pub env_id: Option<EnvironmentId>,
    /// Caller-side reference.
    #[validate(required)]
    pub ref_id: Option<String>,
}

impl DocumentQuery {
    /// A fully specified query.
    pub fn new(module_id: ModuleId, env_id: EnvironmentId, ref_id: impl Into<String>) -> Self {
        Self {
            module_id: Some(module_id),
            env_id: Some(env_id),
            ref_id: Some(ref_id.into()),
        }
    }
}

/// Read access to active documents.
#[derive(Debug, Clone)]
pub struct DocumentService {
    documents: Arc<dyn DocumentStore>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    /// Active documents for the query's reference, oldest first.
    pub async fn list_by_reference(&self, query: &DocumentQuery) -> AppResult<Vec<DocumentSummary>> {
        query
            .validate()
            .map_err(|e| AppError::with_source(ErrorKind::Validation, MISSING_QUERY_FIELDS, e))?;

        let (Some(module_id), Some(env_id), Some(ref_id)) = (
            query.module_id,
            query.env_id,
            query.ref_id.as_deref().map(str::trim).filter(|r| !r.is_empty()),
        ) else {
            return Err(AppError::validation(MISSING_QUERY_FIELDS));
        };

        let documents = self
            .documents
            .list_by_reference(module_id, env_id, ref_id)
            .await
            .map_err(|e| {
                error!(%module_id, %env_id, ref_id, error = %e, "Document lookup failed");
                AppError::internal(format!("Failed to retrieve documents: {}", e.message))
            })?;

        debug!(%module_id, %env_id, ref_id, count = documents.len(), "Listed documents");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use dms_core::config::StorageConfig;
    use dms_core::types::UserId;

    use super::*;
    use crate::context::RequestContext;
    use crate::testing::{MemoryDocumentStore, MemoryMasterStore, MemoryStorage, master};
    use crate::upload::{UploadRequest, UploadService, UploadValidator};

    #[tokio::test]
    async fn test_upload_then_list_by_reference() {
        let documents = Arc::new(MemoryDocumentStore::default());
        let uploads = UploadService::new(
            documents.clone(),
            UploadValidator::new(Arc::new(MemoryMasterStore::with(vec![master(
                1, 2, "invoice", "['pdf']", 10,
            )]))),
            Arc::new(MemoryStorage::default()),
            StorageConfig::default(),
        );
        let ctx = RequestContext::new(UserId::new(5), "/upload", "POST");
        for (reference, name) in [("R1", "a.pdf"), ("R1", "b.PDF"), ("R2", "c.pdf")] {
            uploads
                .upload(
                    &ctx,
                    UploadRequest {
                        env_id: EnvironmentId::new(1),
                        module_id: ModuleId::new(2),
                        doc_type: "invoice".into(),
                        ref_id: reference.into(),
                        parent_id: None,
                        file_name: name.into(),
                        data: Bytes::from_static(b"12345"),
                    },
                )
                .await
                .unwrap();
        }

        let svc = DocumentService::new(documents);
        let listed = svc
            .list_by_reference(&DocumentQuery::new(ModuleId::new(2), EnvironmentId::new(1), "R1"))
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].original_filename, "b.PDF");
        assert_eq!(listed[1].extension, "pdf");
        assert_eq!(listed[1].filesize, 5);

        let value = serde_json::to_value(&listed[0]).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["type"], "invoice");
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let svc = DocumentService::new(Arc::new(MemoryDocumentStore::default()));
        let query = DocumentQuery {
            module_id: Some(ModuleId::new(2)),
            env_id: None,
            ref_id: Some("R1".into()),
        };
        let err = svc.list_by_reference(&query).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message, MISSING_QUERY_FIELDS);

        let blank = DocumentQuery::new(ModuleId::new(2), EnvironmentId::new(1), " ");
        assert!(svc.list_by_reference(&blank).await.is_err());
    }
}
