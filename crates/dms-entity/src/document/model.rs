//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dms_core::types::{DocumentId, EnvironmentId, ModuleId, UserId};

/// A document stored on disk with its metadata row in `ds_document`.
///
/// Exactly one file exists at `filepath` while `deleted` is false.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// Owning environment.
    pub env_id: EnvironmentId,
    /// Optional parent reference supplied by the caller.
    pub parent_id: Option<String>,
    /// Caller-side reference the document is attached to.
    pub ref_id: String,
    /// Owning module.
    pub module_id: ModuleId,
    /// Document type key (matches `ds_document_master.type`).
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Generated file name on disk (`{type}_{uuid}.{ext}`).
    pub filename: String,
    /// Sanitized name the file was uploaded under.
    pub original_filename: String,
    /// Full `/`-separated path of the stored file.
    pub filepath: String,
    /// File size in bytes.
    pub filesize: i64,
    /// Lower-case extension without the leading dot.
    pub extension: String,
    /// Record status.
    pub status: String,
    /// Soft-delete flag.
    pub deleted: bool,
    /// Uploading user.
    pub created_by: UserId,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// User that last changed the record (the deleting user).
    pub updated_by: Option<UserId>,
    /// Time of the last change.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Whether the record is still active.
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

/// Data required to insert a new document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// Owning environment.
    pub env_id: EnvironmentId,
    /// Optional parent reference.
    pub parent_id: Option<String>,
    /// Caller-side reference.
    pub ref_id: String,
    /// Owning module.
    pub module_id: ModuleId,
    /// Document type key.
    pub doc_type: String,
    /// Generated file name on disk.
    pub filename: String,
    /// Sanitized original file name.
    pub original_filename: String,
    /// Full path of the stored file.
    pub filepath: String,
    /// File size in bytes.
    pub filesize: i64,
    /// Lower-case extension.
    pub extension: String,
    /// Uploading user.
    pub created_by: UserId,
    /// Upload time.
    pub created_at: DateTime<Utc>,
}

/// Identifies one active document the way delete requests address it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLocator {
    /// Document identifier.
    pub id: DocumentId,
    /// Owning module.
    pub module_id: ModuleId,
    /// Owning environment.
    pub env_id: EnvironmentId,
    /// Caller-side reference.
    pub ref_id: String,
}

/// Row shape returned when listing the documents of one reference.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentSummary {
    /// Document identifier.
    pub id: DocumentId,
    /// Caller-side reference.
    pub ref_id: String,
    /// Document type key.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Sanitized original file name.
    pub original_filename: String,
    /// Generated file name on disk.
    pub filename: String,
    /// Full path of the stored file.
    pub filepath: String,
    /// File size in bytes.
    pub filesize: i64,
    /// Lower-case extension.
    pub extension: String,
    /// Upload time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Record status.
    pub status: String,
}

impl From<Document> for DocumentSummary {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            ref_id: doc.ref_id,
            doc_type: doc.doc_type,
            original_filename: doc.original_filename,
            filename: doc.filename,
            filepath: doc.filepath,
            filesize: doc.filesize,
            extension: doc.extension,
            created_at: doc.created_at,
            status: doc.status,
        }
    }
}
