//! Upload storage pipeline.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use dms_core::config::StorageConfig;
use dms_core::error::AppError;
use dms_core::result::AppResult;
use dms_core::traits::StorageProvider;
use dms_database::store::DocumentStore;
use dms_entity::document::CreateDocument;
use dms_storage::{StoragePath, secure_filename};

use super::request::{UploadRequest, UploadedDocument};
use super::validation::UploadValidator;
use crate::context::RequestContext;

/// Validates, stores, and records uploaded documents.
#[derive(Clone)]
pub struct UploadService {
    documents: Arc<dyn DocumentStore>,
    validator: UploadValidator,
    storage: Arc<dyn StorageProvider>,
    config: StorageConfig,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("storage", &self.storage.provider_type())
            .field("default_root", &self.config.default_root)
            .finish()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        validator: UploadValidator,
        storage: Arc<dyn StorageProvider>,
        config: StorageConfig,
    ) -> Self {
        Self {
            documents,
            validator,
            storage,
            config,
        }
    }

    /// Store one file and record its metadata.
    ///
    /// Validation happens before any I/O. If the record cannot be written
    /// the stored file is removed again before the error is returned.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        request: UploadRequest,
    ) -> AppResult<UploadedDocument> {
        request.check()?;

        let size = request.data.len() as u64;
        let validated = self
            .validator
            .validate(
                request.env_id,
                request.module_id,
                &request.doc_type,
                &request.file_name,
                size,
            )
            .await?;

        let root = validated
            .master
            .storage_root()
            .unwrap_or(self.config.default_root.as_str());
        let destination =
            StoragePath::generate(root, &request.doc_type, &validated.extension, Utc::now());
        let full_path = destination.full_path();

        self.storage.create_dir(&destination.directory).await?;
        if let Err(e) = self.storage.write(&full_path, request.data).await {
            error!(path = %full_path, error = %e, "Failed to write upload, removing partial file");
            self.discard(&full_path).await;
            return Err(e);
        }

        let mut original_filename = secure_filename(&request.file_name);
        if original_filename.is_empty() {
            original_filename = destination.filename.clone();
        }

        let record = CreateDocument {
            env_id: request.env_id,
            parent_id: request.parent_id,
            ref_id: request.ref_id,
            module_id: request.module_id,
            doc_type: request.doc_type,
            filename: destination.filename.clone(),
            original_filename,
            filepath: full_path.clone(),
            filesize: i64::try_from(size).unwrap_or(i64::MAX),
            extension: validated.extension,
            created_by: ctx.user_id,
            created_at: Utc::now(),
        };

        let document = match self.documents.insert(&record).await {
            Ok(document) => document,
            Err(e) => {
                error!(path = %full_path, error = %e, "Failed to record upload, removing stored file");
                self.discard(&full_path).await;
                return Err(AppError::internal(format!(
                    "Failed to store document metadata: {}",
                    e.message
                )));
            }
        };

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            doc_type = %document.doc_type,
            size,
            path = %document.filepath,
            "Document uploaded"
        );

        Ok(UploadedDocument {
            id: document.id,
            doc_type: document.doc_type,
            name: document.original_filename,
            path: document.filepath,
            file_name: document.filename,
        })
    }

    /// Best-effort removal of a file left behind by a failed upload.
    async fn discard(&self, path: &str) {
        if let Err(e) = self.storage.delete(path).await {
            warn!(path, error = %e, "Failed to remove orphaned upload");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use bytes::Bytes;

    use dms_core::error::ErrorKind;
    use dms_core::types::{EnvironmentId, ModuleId, UserId};
    use dms_storage::LocalStorageProvider;

    use super::*;
    use crate::testing::{MemoryDocumentStore, MemoryMasterStore, MemoryStorage, master};

    fn request(file_name: &str, data: &'static [u8]) -> UploadRequest {
        UploadRequest {
            env_id: EnvironmentId::new(1),
            module_id: ModuleId::new(2),
            doc_type: "invoice".into(),
            ref_id: "REF-1".into(),
            parent_id: Some("P-9".into()),
            file_name: file_name.into(),
            data: Bytes::from_static(data),
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new(UserId::new(42), "/api/documents/upload", "POST")
    }

    fn service(
        documents: Arc<MemoryDocumentStore>,
        storage: Arc<dyn StorageProvider>,
        root: Option<String>,
    ) -> UploadService {
        let mut config = master(1, 2, "invoice", "['pdf', 'jpg']", 1);
        config.filepath = root;
        UploadService::new(
            documents,
            UploadValidator::new(Arc::new(MemoryMasterStore::with(vec![config]))),
            storage,
            StorageConfig {
                default_root: "uploads/documents".into(),
            },
        )
    }

    #[tokio::test]
    async fn test_upload_writes_file_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let documents = Arc::new(MemoryDocumentStore::default());
        let storage = Arc::new(LocalStorageProvider::new(dir.path()));
        let svc = service(documents.clone(), storage, Some(format!("{root}/")));

        let uploaded = svc
            .upload(&ctx(), request("My Scan.PDF", b"%PDF-1.7"))
            .await
            .unwrap();

        assert_eq!(uploaded.name, "My_Scan.PDF");
        assert!(uploaded.file_name.starts_with("invoice_"));
        assert!(uploaded.file_name.ends_with(".pdf"));
        assert!(uploaded.path.starts_with(&root));
        assert!(uploaded.path.ends_with(&uploaded.file_name));
        assert_eq!(std::fs::read(&uploaded.path).unwrap(), b"%PDF-1.7");

        let rows = documents.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].filesize, 8);
        assert_eq!(rows[0].extension, "pdf");
        assert_eq!(rows[0].created_by, UserId::new(42));
        assert_eq!(rows[0].parent_id.as_deref(), Some("P-9"));
    }

    #[tokio::test]
    async fn test_default_root_used_without_configured_path() {
        let storage = Arc::new(MemoryStorage::default());
        let svc = service(Arc::new(MemoryDocumentStore::default()), storage.clone(), None);

        let uploaded = svc.upload(&ctx(), request("a.jpg", b"jpg")).await.unwrap();
        assert!(uploaded.path.starts_with("uploads/documents/"));
        assert_eq!(storage.paths(), vec![uploaded.path.clone()]);
        assert_eq!(storage.dirs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_extension_leaves_no_trace() {
        let documents = Arc::new(MemoryDocumentStore::default());
        let storage = Arc::new(MemoryStorage::default());
        let svc = service(documents.clone(), storage.clone(), None);

        let err = svc
            .upload(&ctx(), request("tool.exe", b"MZ"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(documents.rows().is_empty());
        assert!(storage.paths().is_empty());
        assert!(storage.dirs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_failure_removes_file() {
        let documents = Arc::new(MemoryDocumentStore::default());
        documents.fail_insert.store(true, Ordering::SeqCst);
        let storage = Arc::new(MemoryStorage::default());
        let svc = service(documents.clone(), storage.clone(), None);

        let err = svc
            .upload(&ctx(), request("a.pdf", b"%PDF"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(err.message.starts_with("Failed to store document metadata"));
        assert!(storage.paths().is_empty());
        assert!(documents.rows().is_empty());
    }

    #[tokio::test]
    async fn test_short_write_leaves_no_file_or_record() {
        let documents = Arc::new(MemoryDocumentStore::default());
        let storage = Arc::new(MemoryStorage::default());
        storage.fail_write.store(true, Ordering::SeqCst);
        let svc = service(documents.clone(), storage.clone(), None);

        let err = svc
            .upload(&ctx(), request("a.pdf", b"%PDF-1.7 body"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(documents.rows().is_empty());
        assert!(storage.paths().is_empty());
    }

    #[tokio::test]
    async fn test_non_ascii_name_is_sanitized() {
        let storage = Arc::new(MemoryStorage::default());
        let svc = service(Arc::new(MemoryDocumentStore::default()), storage, None);
        let uploaded = svc
            .upload(&ctx(), request("../Übersicht 2024.pdf", b"x"))
            .await
            .unwrap();
        assert_eq!(uploaded.name, "bersicht_2024.pdf");
    }
}
