//! Declarations of every listable entity.
//!
//! Table and column names here are interpolated into SQL, so the whole
//! catalog is checked by [`ListingCatalog::load`] before first use.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use dms_core::error::AppError;
use dms_core::result::AppResult;
use dms_core::types::SearchFieldSpec;
use dms_database::query::is_identifier;

/// Table, columns, and search fields of one listable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSpec {
    /// Source table.
    pub table: &'static str,
    /// Columns returned for each row, in output order.
    pub select_columns: &'static [&'static str],
    /// Accepted filters, applied in declaration order.
    pub search_fields: &'static [SearchFieldSpec],
}

impl ListingSpec {
    /// Reject identifiers that are not plain SQL names, and search fields
    /// whose column is not selected.
    pub fn validate(&self) -> AppResult<()> {
        if !is_identifier(self.table) {
            return Err(AppError::configuration(format!(
                "Invalid table name in listing declaration: {:?}",
                self.table
            )));
        }
        if self.select_columns.is_empty() {
            return Err(AppError::configuration(format!(
                "Listing for '{}' selects no columns",
                self.table
            )));
        }
        if let Some(bad) = self.select_columns.iter().find(|c| !is_identifier(c)) {
            return Err(AppError::configuration(format!(
                "Invalid column {bad:?} in listing for '{}'",
                self.table
            )));
        }
        for field in self.search_fields {
            if !self.select_columns.contains(&field.column) {
                return Err(AppError::configuration(format!(
                    "Search field '{}' targets column '{}' which '{}' does not select",
                    field.param, field.column, self.table
                )));
            }
        }
        Ok(())
    }
}

static USERS: ListingSpec = ListingSpec {
    table: "ds_user",
    select_columns: &[
        "id",
        "username",
        "first_name",
        "last_name",
        "email",
        "mobile",
        "status",
    ],
    search_fields: &[
        SearchFieldSpec::int("id_search", "id"),
        SearchFieldSpec::like("username_search", "username"),
        SearchFieldSpec::like("first_name_search", "first_name"),
        SearchFieldSpec::like("last_name_search", "last_name"),
        SearchFieldSpec::like("email_search", "email"),
        SearchFieldSpec::like("mobile_search", "mobile"),
        SearchFieldSpec::exact("status_search", "status"),
    ],
};

static DOCUMENTS: ListingSpec = ListingSpec {
    table: "ds_document",
    select_columns: &[
        "id",
        "env_id",
        "type",
        "parent_id",
        "ref_id",
        "module_id",
        "status",
        "created_at",
        "updated_at",
    ],
    search_fields: &[
        SearchFieldSpec::int("id", "id"),
        SearchFieldSpec::int("env_id", "env_id"),
        SearchFieldSpec::like("type", "type"),
        SearchFieldSpec::like("parent_id", "parent_id"),
        SearchFieldSpec::like("ref_id", "ref_id"),
        SearchFieldSpec::int("module_id", "module_id"),
        SearchFieldSpec::exact("status", "status"),
        SearchFieldSpec::datetime("created_at", "created_at"),
        SearchFieldSpec::datetime("updated_at", "updated_at"),
    ],
};

static ACCESS_LOGS: ListingSpec = ListingSpec {
    table: "ds_access_log",
    select_columns: &[
        "id",
        "env_id",
        "url",
        "method",
        "status",
        "created_at",
        "updated_at",
    ],
    search_fields: &[
        SearchFieldSpec::int("id", "id"),
        SearchFieldSpec::int("env_id", "env_id"),
        SearchFieldSpec::like("url", "url"),
        SearchFieldSpec::like("method", "method"),
        SearchFieldSpec::exact("status", "status"),
        SearchFieldSpec::datetime("created_at", "created_at"),
        SearchFieldSpec::datetime("updated_at", "updated_at"),
    ],
};

static DOCUMENT_MASTERS: ListingSpec = ListingSpec {
    table: "ds_document_master",
    select_columns: &[
        "id",
        "env_id",
        "module_id",
        "type",
        "status",
        "created_at",
        "updated_at",
    ],
    search_fields: &[
        SearchFieldSpec::int("id", "id"),
        SearchFieldSpec::int("env_id", "env_id"),
        SearchFieldSpec::int("module_id", "module_id"),
        SearchFieldSpec::like("type", "type"),
        SearchFieldSpec::exact("status", "status"),
        SearchFieldSpec::datetime("created_at", "created_at"),
        SearchFieldSpec::datetime("updated_at", "updated_at"),
    ],
};

static APP_CONFIGS: ListingSpec = ListingSpec {
    table: "ds_application_config",
    select_columns: &[
        "id",
        "env",
        "code",
        "app_api_config",
        "created_at",
        "updated_at",
    ],
    search_fields: &[
        SearchFieldSpec::int("id", "id"),
        SearchFieldSpec::like("env", "env"),
        SearchFieldSpec::like("code", "code"),
        SearchFieldSpec::like("app_api_config", "app_api_config"),
        SearchFieldSpec::datetime("created_at", "created_at"),
        SearchFieldSpec::datetime("updated_at", "updated_at"),
    ],
};

/// The listable entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListEntity {
    /// `ds_user`
    Users,
    /// `ds_document`
    Documents,
    /// `ds_access_log`
    AccessLogs,
    /// `ds_document_master`
    DocumentMasters,
    /// `ds_application_config`
    AppConfigs,
}

impl ListEntity {
    /// Every entity, in display order.
    pub const ALL: [ListEntity; 5] = [
        Self::Users,
        Self::Documents,
        Self::AccessLogs,
        Self::DocumentMasters,
        Self::AppConfigs,
    ];

    /// Stable name used on the command line and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Documents => "documents",
            Self::AccessLogs => "access_logs",
            Self::DocumentMasters => "document_masters",
            Self::AppConfigs => "app_configs",
        }
    }

    fn spec(&self) -> &'static ListingSpec {
        match self {
            Self::Users => &USERS,
            Self::Documents => &DOCUMENTS,
            Self::AccessLogs => &ACCESS_LOGS,
            Self::DocumentMasters => &DOCUMENT_MASTERS,
            Self::AppConfigs => &APP_CONFIGS,
        }
    }
}

impl fmt::Display for ListEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListEntity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == wanted)
            .ok_or_else(|| AppError::validation(format!("Unknown entity '{s}'")))
    }
}

/// The validated set of listing declarations.
#[derive(Debug, Clone)]
pub struct ListingCatalog {
    specs: BTreeMap<ListEntity, &'static ListingSpec>,
}

impl ListingCatalog {
    /// Validate every declaration.
    pub fn load() -> AppResult<Self> {
        let mut specs = BTreeMap::new();
        for entity in ListEntity::ALL {
            let spec = entity.spec();
            spec.validate()?;
            specs.insert(entity, spec);
        }
        Ok(Self { specs })
    }

    /// The declaration for `entity`.
    pub fn spec(&self, entity: ListEntity) -> &'static ListingSpec {
        self.specs.get(&entity).copied().unwrap_or_else(|| entity.spec())
    }

    /// Entities and their tables.
    pub fn entries(&self) -> impl Iterator<Item = (ListEntity, &'static ListingSpec)> + '_ {
        self.specs.iter().map(|(e, s)| (*e, *s))
    }
}
