//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// Upload storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory used when a document-type config has no `filepath`.
    #[serde(default = "default_root")]
    pub default_root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            default_root: default_root(),
        }
    }
}

fn default_root() -> String {
    "uploads/documents".to_string()
}
