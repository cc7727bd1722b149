//! In-memory store and storage doubles for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use serde_json::{Map, Value};

use dms_core::error::AppError;
use dms_core::result::AppResult;
use dms_core::traits::StorageProvider;
use dms_core::types::{
    AccessLogId, DocumentId, DocumentMasterId, EnvironmentId, ModuleId, UserId,
};
use dms_database::query::QueryParam;
use dms_database::store::{
    AccessLogStore, DocumentMasterStore, DocumentStore, ListStore, SoftDeletion,
};
use dms_entity::access_log::{AccessLogEntry, CreateAccessLogEntry};
use dms_entity::document::{CreateDocument, Document, DocumentLocator, DocumentSummary};
use dms_entity::document_master::{ACTIVE_STATUS, DocumentMaster};

pub(crate) fn master(env: i64, module: i64, doc_type: &str, allowed: &str, max_kb: i64) -> DocumentMaster {
    DocumentMaster {
        id: DocumentMasterId::new(1),
        env_id: EnvironmentId::new(env),
        module_id: ModuleId::new(module),
        doc_type: doc_type.to_string(),
        allowed_extension: allowed.to_string(),
        allowed_max_size: max_kb,
        filepath: None,
        status: ACTIVE_STATUS.to_string(),
        deleted: false,
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryMasterStore {
    pub masters: Vec<DocumentMaster>,
    pub lookups: AtomicUsize,
}

impl MemoryMasterStore {
    pub fn with(masters: Vec<DocumentMaster>) -> Self {
        Self {
            masters,
            lookups: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentMasterStore for MemoryMasterStore {
    async fn find_active(
        &self,
        env_id: EnvironmentId,
        module_id: ModuleId,
        doc_type: &str,
    ) -> AppResult<Option<DocumentMaster>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .masters
            .iter()
            .find(|m| {
                m.env_id == env_id
                    && m.module_id == module_id
                    && m.doc_type == doc_type
                    && !m.deleted
                    && m.status == ACTIVE_STATUS
            })
            .cloned())
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryDocumentStore {
    pub rows: Arc<Mutex<Vec<Document>>>,
    next_id: AtomicI64,
    pub fail_insert: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn rows(&self) -> Vec<Document> {
        self.rows.lock().unwrap().clone()
    }

    pub fn seed(&self, document: Document) {
        self.rows.lock().unwrap().push(document);
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, data: &CreateDocument) -> AppResult<Document> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(AppError::database("connection reset"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let document = Document {
            id: DocumentId::new(id),
            env_id: data.env_id,
            parent_id: data.parent_id.clone(),
            ref_id: data.ref_id.clone(),
            module_id: data.module_id,
            doc_type: data.doc_type.clone(),
            filename: data.filename.clone(),
            original_filename: data.original_filename.clone(),
            filepath: data.filepath.clone(),
            filesize: data.filesize,
            extension: data.extension.clone(),
            status: "active".to_string(),
            deleted: false,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_by: None,
            updated_at: None,
        };
        self.rows.lock().unwrap().push(document.clone());
        Ok(document)
    }

    async fn begin_soft_delete(
        &self,
        locator: &DocumentLocator,
        deleted_by: UserId,
    ) -> AppResult<Option<Box<dyn SoftDeletion>>> {
        let found = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| {
                d.id == locator.id
                    && d.module_id == locator.module_id
                    && d.env_id == locator.env_id
                    && d.ref_id == locator.ref_id
                    && d.is_active()
            })
            .cloned();
        Ok(found.map(|mut document| {
            document.deleted = true;
            document.updated_by = Some(deleted_by);
            document.updated_at = Some(Utc::now());
            Box::new(MemorySoftDeletion {
                rows: Arc::clone(&self.rows),
                document,
            }) as Box<dyn SoftDeletion>
        }))
    }

    async fn list_by_reference(
        &self,
        module_id: ModuleId,
        env_id: EnvironmentId,
        ref_id: &str,
    ) -> AppResult<Vec<DocumentSummary>> {
        Ok(self
            .rows()
            .into_iter()
            .filter(|d| {
                d.module_id == module_id && d.env_id == env_id && d.ref_id == ref_id && d.is_active()
            })
            .map(DocumentSummary::from)
            .collect())
    }
}

struct MemorySoftDeletion {
    rows: Arc<Mutex<Vec<Document>>>,
    document: Document,
}

#[async_trait]
impl SoftDeletion for MemorySoftDeletion {
    fn document(&self) -> &Document {
        &self.document
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|d| d.id == self.document.id) {
            *row = self.document.clone();
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingListStore {
    pub rows: Vec<Map<String, Value>>,
    pub total: u64,
    pub fail_rows: bool,
    pub fail_count: bool,
    pub calls: Mutex<Vec<(String, Vec<QueryParam>)>>,
}

impl RecordingListStore {
    pub fn calls(&self) -> Vec<(String, Vec<QueryParam>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListStore for RecordingListStore {
    async fn fetch_rows(
        &self,
        sql: &str,
        params: &[QueryParam],
    ) -> AppResult<Vec<Map<String, Value>>> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        if self.fail_rows {
            return Err(AppError::database("relation does not exist"));
        }
        Ok(self.rows.clone())
    }

    async fn count(&self, sql: &str, params: &[QueryParam]) -> AppResult<u64> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        if self.fail_count {
            return Err(AppError::database("relation does not exist"));
        }
        Ok(self.total)
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryAccessLogStore {
    pub entries: Mutex<Vec<CreateAccessLogEntry>>,
    pub fail: bool,
}

#[async_trait]
impl AccessLogStore for MemoryAccessLogStore {
    async fn create(&self, data: &CreateAccessLogEntry) -> AppResult<AccessLogEntry> {
        if self.fail {
            return Err(AppError::database("disk full"));
        }
        let mut entries = self.entries.lock().unwrap();
        entries.push(data.clone());
        Ok(AccessLogEntry {
            id: AccessLogId::new(entries.len() as i64),
            env_id: data.env_id,
            url: data.url.clone(),
            method: data.method.clone(),
            request_body: Some(data.request_body.clone()),
            response: Some(data.response.clone()),
            status: data.status.as_str().to_string(),
            ip: data.ip.clone(),
            created_by: data.created_by,
            created_at: Utc::now(),
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    pub files: Mutex<HashMap<String, Bytes>>,
    pub dirs: Mutex<Vec<String>>,
    pub fail_write: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl MemoryStorage {
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn put(&self, path: &str, data: &'static str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), Bytes::from(data));
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn create_dir(&self, path: &str) -> AppResult<()> {
        self.dirs.lock().unwrap().push(path.to_string());
        Ok(())
    }

    /// With `fail_write` set, half of the data lands before the error.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        if self.fail_write.load(Ordering::SeqCst) {
            let partial = data.slice(..data.len() / 2);
            self.files.lock().unwrap().insert(path.to_string(), partial);
            return Err(AppError::storage("No space left on device"));
        }
        self.files.lock().unwrap().insert(path.to_string(), data);
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<bool> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::storage("Permission denied"));
        }
        Ok(self.files.lock().unwrap().remove(path).is_some())
    }
}
