//! Document-type configuration model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dms_core::types::{DocumentMasterId, EnvironmentId, ModuleId};

/// Status value of a usable configuration row.
pub const ACTIVE_STATUS: &str = "active";

/// Upload configuration for one (environment, module, type) key,
/// stored in `ds_document_master`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentMaster {
    /// Row identifier.
    pub id: DocumentMasterId,
    /// Environment the configuration applies to.
    pub env_id: EnvironmentId,
    /// Module the configuration applies to.
    pub module_id: ModuleId,
    /// Document type key.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Operator-entered list of allowed extensions, e.g. `['pdf', ".JPG"]`.
    pub allowed_extension: String,
    /// Maximum file size in kilobytes.
    pub allowed_max_size: i64,
    /// Storage root for this type; the global default applies when unset.
    pub filepath: Option<String>,
    /// Row status; only `active` rows are used.
    pub status: String,
    /// Soft-delete flag.
    pub deleted: bool,
}

impl DocumentMaster {
    /// Maximum file size in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        u64::try_from(self.allowed_max_size)
            .unwrap_or(0)
            .saturating_mul(1024)
    }

    /// Configured storage root without trailing slashes, if set.
    pub fn storage_root(&self) -> Option<&str> {
        self.filepath
            .as_deref()
            .map(|p| p.trim().trim_end_matches(['/', '\\']))
            .filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master(filepath: Option<&str>, max_kb: i64) -> DocumentMaster {
        DocumentMaster {
            id: DocumentMasterId::new(1),
            env_id: EnvironmentId::new(1),
            module_id: ModuleId::new(2),
            doc_type: "invoice".to_string(),
            allowed_extension: "['pdf']".to_string(),
            allowed_max_size: max_kb,
            filepath: filepath.map(str::to_string),
            status: ACTIVE_STATUS.to_string(),
            deleted: false,
        }
    }

    #[test]
    fn test_max_size_bytes() {
        assert_eq!(master(None, 2).max_size_bytes(), 2048);
        assert_eq!(master(None, -1).max_size_bytes(), 0);
    }

    #[test]
    fn test_storage_root() {
        assert_eq!(master(Some("/srv/docs/"), 1).storage_root(), Some("/srv/docs"));
        assert_eq!(master(Some("  "), 1).storage_root(), None);
        assert_eq!(master(None, 1).storage_root(), None);
    }
}
