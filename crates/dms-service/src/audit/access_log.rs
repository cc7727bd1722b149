//! Access log recording.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use dms_core::types::{ApiResponse, EnvironmentId};
use dms_database::store::AccessLogStore;
use dms_entity::access_log::{AccessStatus, CreateAccessLogEntry};

use crate::context::RequestContext;

/// Appends one `ds_access_log` row per completed operation.
#[derive(Debug, Clone)]
pub struct AccessLogService {
    store: Arc<dyn AccessLogStore>,
}

impl AccessLogService {
    /// Creates a new access log service.
    pub fn new(store: Arc<dyn AccessLogStore>) -> Self {
        Self { store }
    }

    /// Record a completed call. Failures are logged and otherwise ignored.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        request_body: &Value,
        response: &ApiResponse,
        env_id: Option<EnvironmentId>,
    ) {
        let response_text = match serde_json::to_string(response) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Failed to serialize response for access log");
                return;
            }
        };

        let entry = CreateAccessLogEntry {
            env_id,
            url: ctx.url.clone(),
            method: ctx.method.clone(),
            request_body: request_body.to_string(),
            response: response_text,
            status: AccessStatus::from_response_code(response.response_code),
            ip: ctx.ip_address.clone(),
            created_by: Some(ctx.user_id),
        };

        match self.store.create(&entry).await {
            Ok(saved) => debug!(entry_id = %saved.id, status = %entry.status, "Access logged"),
            Err(e) => warn!(url = %ctx.url, error = %e, "Failed to write access log"),
        }
    }
}
