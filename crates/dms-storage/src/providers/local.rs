//! Local filesystem storage provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use dms_core::error::{AppError, ErrorKind};
use dms_core::result::AppResult;
use dms_core::traits::StorageProvider;

/// Stores documents at the exact paths recorded in their metadata.
///
/// Relative paths resolve against the process working directory. The
/// default root is only used for health checks; each upload carries its own
/// destination.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    default_root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a provider whose health is judged by `default_root`.
    pub fn new(default_root: impl Into<PathBuf>) -> Self {
        Self {
            default_root: default_root.into(),
        }
    }

    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create directory: {}", parent.display()),
                        e,
                    )
                })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        match fs::create_dir_all(&self.default_root).await {
            Ok(()) => Ok(true),
            Err(e) => {
                debug!(root = %self.default_root.display(), error = %e, "Default root unusable");
                Ok(false)
            }
        }
    }

    async fn create_dir(&self, path: &str) -> AppResult<()> {
        fs::create_dir_all(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create directory: {path}"),
                e,
            )
        })
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let target = PathBuf::from(path);
        self.ensure_parent(&target).await?;

        fs::write(&target, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {path}"),
                e,
            )
        })?;

        debug!(path, bytes = data.len(), "Stored file");
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<bool> {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!(path, "Removed file");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove file: {path}"),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_in(dir: &tempfile::TempDir, rel: &str) -> String {
        dir.path().join(rel).to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_write_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path());
        let path = path_in(&dir, "2024/01/02/invoice_x.pdf");

        provider.write(&path, Bytes::from("%PDF")).await.unwrap();
        assert_eq!(fs::read(&path).await.unwrap(), b"%PDF");

        assert!(provider.delete(&path).await.unwrap());
        assert!(!fs::try_exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_write_over_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path());
        let path = path_in(&dir, "taken");
        provider.create_dir(&path).await.unwrap();

        let err = provider.write(&path, Bytes::from("x")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(provider.delete(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path());
        assert!(!provider.delete(&path_in(&dir, "gone.pdf")).await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("uploads/documents");
        let provider = LocalStorageProvider::new(&root);
        assert!(provider.health_check().await.unwrap());
        assert!(root.is_dir());
        assert_eq!(provider.provider_type(), "local");
    }
}
