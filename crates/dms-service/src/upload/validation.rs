//! Validation of a candidate file against its document-type configuration.

use std::sync::Arc;

use tracing::debug;

use dms_core::error::AppError;
use dms_core::result::AppResult;
use dms_core::types::{EnvironmentId, ModuleId};
use dms_database::store::DocumentMasterStore;
use dms_entity::document_master::DocumentMaster;
use dms_storage::file_extension;

use super::extensions::AllowedExtensions;

/// A file that passed validation, with the configuration it passed against.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    /// The matching configuration row.
    pub master: DocumentMaster,
    /// Lower-cased extension of the file.
    pub extension: String,
}

/// Resolves the per-(environment, module, type) rules and applies them.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    masters: Arc<dyn DocumentMasterStore>,
}

impl UploadValidator {
    /// Creates a new validator.
    pub fn new(masters: Arc<dyn DocumentMasterStore>) -> Self {
        Self { masters }
    }

    /// Check `file_name` and `file_size` (bytes) against the active
    /// configuration for the key.
    ///
    /// Missing configuration is a not-found error; a broken extension list
    /// is a configuration error; a wrong extension or oversize file is a
    /// validation error.
    pub async fn validate(
        &self,
        env_id: EnvironmentId,
        module_id: ModuleId,
        doc_type: &str,
        file_name: &str,
        file_size: u64,
    ) -> AppResult<ValidatedUpload> {
        let master = self
            .masters
            .find_active(env_id, module_id, doc_type)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "No document master configuration found for type '{doc_type}' \
                     in module '{module_id}' and environment '{env_id}'."
                ))
            })?;

        let allowed = AllowedExtensions::parse(&master.allowed_extension)?;
        let extension = file_extension(file_name)
            .filter(|ext| allowed.contains(ext))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "File type not allowed. Allowed types: {}",
                    allowed.describe()
                ))
            })?;

        if file_size > master.max_size_bytes() {
            return Err(AppError::validation(format!(
                "File size exceeds the maximum allowed size of {} KB.",
                master.allowed_max_size
            )));
        }

        debug!(%env_id, %module_id, doc_type, extension, file_size, "Upload validated");
        Ok(ValidatedUpload { master, extension })
    }
}
