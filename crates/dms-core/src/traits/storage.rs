//! Storage provider trait for the upload file store.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for file storage backends holding uploaded documents.
///
/// Paths are full, `/`-separated locations exactly as recorded in a
/// document's `filepath` column. The local filesystem implementation lives
/// in `dms-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider can store files.
    async fn health_check(&self) -> AppResult<bool>;

    /// Create a directory (and any missing parents).
    async fn create_dir(&self, path: &str) -> AppResult<()>;

    /// Write bytes to a file at the given path, creating parent directories.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete the file at the given path.
    ///
    /// A missing file is not an error; returns whether a file was removed.
    async fn delete(&self, path: &str) -> AppResult<bool>;
}
