//! Search-field declarations and list query requests.
//!
//! A listable entity declares an ordered set of [`SearchFieldSpec`]s at
//! startup. Each spec maps one request parameter onto one database column
//! together with how the raw value is interpreted and compared.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ListingConfig;
use crate::types::pagination::PageRequest;

/// How a raw filter value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Parsed to an integer; unparseable input is a validation error.
    Int,
    /// Compared as text.
    String,
    /// Matched as a substring of the column's text representation.
    Datetime,
}

/// How a string filter is compared against its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Equality.
    Exact,
    /// Case-sensitive "contains" (`LIKE '%value%'`).
    Substring,
}

/// Maps one request parameter onto one filterable database column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchFieldSpec {
    /// Name of the request parameter carrying the filter value.
    pub param: &'static str,
    /// Database column the predicate applies to.
    pub column: &'static str,
    /// Interpretation of the raw value.
    pub value_type: ValueType,
    /// Comparison mode (only meaningful for [`ValueType::String`]).
    pub comparison: Comparison,
}

impl SearchFieldSpec {
    /// Integer equality filter.
    pub const fn int(param: &'static str, column: &'static str) -> Self {
        Self {
            param,
            column,
            value_type: ValueType::Int,
            comparison: Comparison::Exact,
        }
    }

    /// Exact string filter.
    pub const fn exact(param: &'static str, column: &'static str) -> Self {
        Self {
            param,
            column,
            value_type: ValueType::String,
            comparison: Comparison::Exact,
        }
    }

    /// Substring string filter.
    pub const fn like(param: &'static str, column: &'static str) -> Self {
        Self {
            param,
            column,
            value_type: ValueType::String,
            comparison: Comparison::Substring,
        }
    }

    /// Datetime filter, matched against the column's text form.
    pub const fn datetime(param: &'static str, column: &'static str) -> Self {
        Self {
            param,
            column,
            value_type: ValueType::Datetime,
            comparison: Comparison::Substring,
        }
    }
}

/// A parsed list request: paging plus raw filter values keyed by parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQueryRequest {
    /// Page and limit.
    pub page: PageRequest,
    /// Raw filter values keyed by request parameter name.
    pub filters: BTreeMap<String, String>,
}

impl ListQueryRequest {
    /// Create a request from paging and filters.
    pub fn new(page: PageRequest, filters: BTreeMap<String, String>) -> Self {
        Self { page, filters }
    }

    /// Build a request from a JSON object body.
    ///
    /// `page` and `limit` are coerced per [`PageRequest::from_raw`]. Every
    /// other string, number, or boolean member becomes a raw filter value;
    /// nulls, arrays, and objects are ignored.
    pub fn from_json(body: &serde_json::Value, config: &ListingConfig) -> Self {
        let page = PageRequest::from_raw(body.get("page"), body.get("limit"), config);
        let filters = body
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter(|(key, _)| key.as_str() != "page" && key.as_str() != "limit")
                    .filter_map(|(key, value)| {
                        let raw = match value {
                            serde_json::Value::String(s) => s.clone(),
                            serde_json::Value::Number(n) => n.to_string(),
                            serde_json::Value::Bool(b) => b.to_string(),
                            _ => return None,
                        };
                        Some((key.clone(), raw))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { page, filters }
    }

    /// Add or replace a filter value.
    pub fn with_filter(mut self, param: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(param.into(), value.into());
        self
    }

    /// Return the trimmed, non-empty value for a parameter.
    pub fn filter(&self, param: &str) -> Option<&str> {
        self.filters
            .get(param)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}
