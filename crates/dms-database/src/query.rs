//! Paginated list query builder.
//!
//! Turns a table name, its select columns, its declared search fields, and a
//! [`ListQueryRequest`] into a parameterized SELECT/COUNT pair. Filter values
//! are always bound as `$n` parameters. Table and column names are
//! interpolated and must come from a startup-validated declaration, see
//! [`is_identifier`].

use dms_core::error::AppError;
use dms_core::result::AppResult;
use dms_core::types::{Comparison, ListQueryRequest, PageRequest, SearchFieldSpec, ValueType};

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    /// Bound as `BIGINT`.
    Int(i64),
    /// Bound as `TEXT`.
    Text(String),
}

/// A ready-to-run SELECT/COUNT pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Page SELECT ending in `LIMIT $k OFFSET $k+1`.
    pub select_sql: String,
    /// Filter parameters followed by limit and offset.
    pub select_params: Vec<QueryParam>,
    /// `SELECT COUNT(*)` with the same WHERE clause.
    pub count_sql: String,
    /// Filter parameters only.
    pub count_params: Vec<QueryParam>,
    /// The page the SELECT fetches.
    pub page: PageRequest,
}

/// Whether `name` is a plain SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Build the SELECT/COUNT pair for one list request.
///
/// Filters whose value is missing or blank after trimming are skipped. An
/// integer filter that does not parse fails the whole build with a
/// validation error. Substring and datetime filters match the value
/// literally: `%`, `_` and `\` in it are escaped. Rows are ordered by the
/// first select column.
pub fn build_list_query(
    table: &str,
    select_columns: &[&str],
    search_fields: &[SearchFieldSpec],
    request: &ListQueryRequest,
) -> AppResult<ListQuery> {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    for field in search_fields {
        let Some(raw) = request.filter(field.param) else {
            continue;
        };
        let idx = params.len() + 1;
        match field.value_type {
            ValueType::Int => {
                let value = raw.parse::<i64>().map_err(|_| {
                    AppError::validation(format!(
                        "Invalid '{}' parameter. Must be an integer.",
                        field.param
                    ))
                })?;
                conditions.push(format!("{} = ${idx}", field.column));
                params.push(QueryParam::Int(value));
            }
            ValueType::Datetime => {
                conditions.push(format!("{}::text LIKE ${idx} ESCAPE '\\'", field.column));
                params.push(QueryParam::Text(contains_pattern(raw)));
            }
            ValueType::String => match field.comparison {
                Comparison::Exact => {
                    conditions.push(format!("{} = ${idx}", field.column));
                    params.push(QueryParam::Text(raw.to_string()));
                }
                Comparison::Substring => {
                    conditions.push(format!("{} LIKE ${idx} ESCAPE '\\'", field.column));
                    params.push(QueryParam::Text(contains_pattern(raw)));
                }
            },
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let page = request.page;
    let limit_idx = params.len() + 1;
    let order_by = select_columns
        .first()
        .map(|c| format!(" ORDER BY {c}"))
        .unwrap_or_default();

    let select_sql = format!(
        "SELECT {} FROM {table}{where_clause}{order_by} LIMIT ${limit_idx} OFFSET ${}",
        select_columns.join(", "),
        limit_idx + 1
    );
    let count_sql = format!("SELECT COUNT(*) FROM {table}{where_clause}");

    let count_params = params.clone();
    let mut select_params = params;
    select_params.push(QueryParam::Int(clamp_i64(page.limit)));
    select_params.push(QueryParam::Int(clamp_i64(page.offset())));

    Ok(ListQuery {
        select_sql,
        select_params,
        count_sql,
        count_params,
        page,
    })
}

/// `%value%` with LIKE wildcards in `value` escaped.
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
