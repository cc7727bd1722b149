//! Access log repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use dms_core::error::{AppError, ErrorKind};
use dms_core::result::AppResult;
use dms_entity::access_log::{AccessLogEntry, CreateAccessLogEntry};

use crate::store::AccessLogStore;

/// Append-only repository for `ds_access_log`.
#[derive(Debug, Clone)]
pub struct AccessLogRepository {
    pool: PgPool,
}

impl AccessLogRepository {
    /// Create a new access log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessLogStore for AccessLogRepository {
    async fn create(&self, data: &CreateAccessLogEntry) -> AppResult<AccessLogEntry> {
        sqlx::query_as::<_, AccessLogEntry>(
            "INSERT INTO ds_access_log \
             (env_id, url, method, request_body, response, status, ip, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, env_id, url, method, request_body, response, status, ip, \
             created_by, created_at",
        )
        .bind(data.env_id)
        .bind(&data.url)
        .bind(&data.method)
        .bind(&data.request_body)
        .bind(&data.response)
        .bind(data.status.as_str())
        .bind(&data.ip)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create access log entry", e)
        })
    }
}
