//! Request context carrying the acting user and the call's origin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dms_core::types::UserId;

/// Who is acting, and through which call.
///
/// Built by the caller (HTTP layer or CLI) after authentication and passed
/// into every mutating service method and the access log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user.
    pub user_id: UserId,
    /// Requested URL or command name.
    pub url: String,
    /// HTTP method or command verb.
    pub method: String,
    /// Client IP address, when known.
    pub ip_address: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Create a context stamped with the current time.
    pub fn new(user_id: UserId, url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            user_id,
            url: url.into(),
            method: method.into(),
            ip_address: None,
            request_time: Utc::now(),
        }
    }

    /// Attach the client IP address.
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }
}
