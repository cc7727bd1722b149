//! Access log entry entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dms_core::types::{AccessLogId, EnvironmentId, UserId};

/// Outcome recorded for an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessStatus {
    /// The call was received but not yet completed.
    Requested,
    /// The call completed with a 200 response.
    Success,
    /// The call completed with any other response.
    Failed,
}

impl AccessStatus {
    /// Status stored for a completed call with the given response code.
    pub fn from_response_code(code: u16) -> Self {
        if code == 200 { Self::Success } else { Self::Failed }
    }

    /// Column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable row of `ds_access_log`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccessLogEntry {
    /// Unique entry identifier.
    pub id: AccessLogId,
    /// Environment named by the request, if any.
    pub env_id: Option<EnvironmentId>,
    /// Requested URL.
    pub url: String,
    /// HTTP method.
    pub method: String,
    /// Request body as JSON text.
    pub request_body: Option<String>,
    /// Response envelope as JSON text.
    pub response: Option<String>,
    /// Outcome (`Requested`, `Success`, `Failed`).
    pub status: String,
    /// Client IP address.
    pub ip: Option<String>,
    /// Acting user.
    pub created_by: Option<UserId>,
    /// When the call was logged.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new access log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccessLogEntry {
    /// Environment named by the request.
    pub env_id: Option<EnvironmentId>,
    /// Requested URL.
    pub url: String,
    /// HTTP method.
    pub method: String,
    /// Request body as JSON text.
    pub request_body: String,
    /// Response envelope as JSON text.
    pub response: String,
    /// Outcome.
    pub status: AccessStatus,
    /// Client IP address.
    pub ip: Option<String>,
    /// Acting user.
    pub created_by: Option<UserId>,
}
