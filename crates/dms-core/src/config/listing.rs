//! Paginated listing configuration.

use serde::{Deserialize, Serialize};

/// Paging defaults for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Items per page when the request omits `limit` or sends garbage.
    #[serde(default = "default_limit")]
    pub default_limit: u64,
    /// Upper bound applied to any requested `limit`.
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u64 {
    5
}

fn default_max_limit() -> u64 {
    100
}
