//! Executor for built list queries.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};
use tracing::debug;

use dms_core::error::{AppError, ErrorKind};
use dms_core::result::AppResult;

use crate::query::QueryParam;
use crate::row::row_to_json;
use crate::store::ListStore;

/// Runs SELECT/COUNT pairs produced by [`crate::query::build_list_query`].
#[derive(Debug, Clone)]
pub struct ListingRepository {
    pool: PgPool,
}

impl ListingRepository {
    /// Create a new listing repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [QueryParam],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            QueryParam::Int(v) => query.bind(*v),
            QueryParam::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

#[async_trait]
impl ListStore for ListingRepository {
    async fn fetch_rows(
        &self,
        sql: &str,
        params: &[QueryParam],
    ) -> AppResult<Vec<Map<String, Value>>> {
        debug!(sql, params = params.len(), "Fetching list page");
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch rows", e))?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn count(&self, sql: &str, params: &[QueryParam]) -> AppResult<u64> {
        let row = bind_params(sqlx::query(sql), params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count rows", e))?;
        let total: i64 = row
            .try_get(0)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read count", e))?;
        Ok(u64::try_from(total).unwrap_or(0))
    }
}
