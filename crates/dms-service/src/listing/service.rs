//! Paginated list service.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info};

use dms_core::config::ListingConfig;
use dms_core::error::AppError;
use dms_core::result::AppResult;
use dms_core::types::{ListQueryRequest, PageResponse};
use dms_database::query::build_list_query;
use dms_database::store::ListStore;

use super::catalog::{ListEntity, ListingCatalog, ListingSpec};

/// One page of untyped rows.
pub type ListPage = PageResponse<Map<String, Value>>;

const RETRIEVE_FAILED: &str = "Failed to retrieve data from database.";

/// Runs filtered, paginated listings over the catalog's tables.
#[derive(Debug, Clone)]
pub struct ListService {
    store: Arc<dyn ListStore>,
    catalog: ListingCatalog,
    config: ListingConfig,
}

impl ListService {
    /// Creates a new list service.
    pub fn new(store: Arc<dyn ListStore>, catalog: ListingCatalog, config: ListingConfig) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    /// Parse a loosely typed JSON body into a request using the configured
    /// default and maximum limits.
    pub fn request_from_json(&self, body: &Value) -> ListQueryRequest {
        ListQueryRequest::from_json(body, &self.config)
    }

    /// List one catalog entity.
    pub async fn list(&self, entity: ListEntity, request: &ListQueryRequest) -> AppResult<ListPage> {
        self.run(self.catalog.spec(entity), request).await
    }

    /// List an ad-hoc declaration after validating its identifiers.
    pub async fn list_with_spec(
        &self,
        spec: &ListingSpec,
        request: &ListQueryRequest,
    ) -> AppResult<ListPage> {
        spec.validate()?;
        self.run(spec, request).await
    }

    async fn run(&self, spec: &ListingSpec, request: &ListQueryRequest) -> AppResult<ListPage> {
        let query = build_list_query(
            spec.table,
            spec.select_columns,
            spec.search_fields,
            request,
        )?;

        let total = self
            .store
            .count(&query.count_sql, &query.count_params)
            .await
            .map_err(|e| {
                error!(table = spec.table, error = %e, "List count query failed");
                AppError::internal(RETRIEVE_FAILED)
            })?;

        let rows = self
            .store
            .fetch_rows(&query.select_sql, &query.select_params)
            .await
            .map_err(|e| {
                error!(table = spec.table, error = %e, "List select query failed");
                AppError::internal(RETRIEVE_FAILED)
            })?;

        info!(
            table = spec.table,
            page = query.page.page,
            limit = query.page.limit,
            total,
            "Listed rows"
        );
        Ok(PageResponse::new(rows, &query.page, total))
    }
}
