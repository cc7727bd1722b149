//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::ListingConfig;

/// Default page number.
const DEFAULT_PAGE: u64 = 1;

/// Page/limit pair of a paginated query, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request, clamping both values to at least 1.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Coerce loosely typed `page` / `limit` request values.
    ///
    /// Values may be JSON numbers or numeric strings. Missing, unparseable,
    /// or non-positive values fall back to page 1 and the configured default
    /// limit; the limit is capped at `max_limit`.
    pub fn from_raw(
        page: Option<&serde_json::Value>,
        limit: Option<&serde_json::Value>,
        config: &ListingConfig,
    ) -> Self {
        let page = page.and_then(positive_int).unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(positive_int)
            .unwrap_or(config.default_limit)
            .min(config.max_limit.max(1));
        Self::new(page, limit)
    }

    /// Calculate the SQL `OFFSET` value, saturating at `u64::MAX`.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Total number of pages for `total_items` rows.
    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, ListingConfig::default().default_limit)
    }
}

fn positive_int(value: &serde_json::Value) -> Option<u64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    u64::try_from(parsed).ok().filter(|v| *v >= 1)
}

/// Pagination envelope returned by list operations.
///
/// Serialized as `{data, currentPage, itemsPerPage, totalItems, totalPages}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    /// The rows on this page.
    #[serde(rename = "data")]
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub current_page: u64,
    /// Number of items per page.
    pub items_per_page: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: &PageRequest, total_items: u64) -> Self {
        Self {
            items,
            current_page: page.page,
            items_per_page: page.limit,
            total_items,
            total_pages: page.total_pages(total_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_offset_and_total_pages() {
        let page = PageRequest::new(2, 5);
        assert_eq!(page.offset(), 5);
        assert_eq!(page.total_pages(12), 3);
        assert_eq!(page.total_pages(10), 2);
        assert_eq!(page.total_pages(0), 0);
    }

    #[test]
    fn test_from_raw_accepts_numbers_and_strings() {
        let config = ListingConfig::default();
        let page = PageRequest::from_raw(Some(&json!("3")), Some(&json!(10)), &config);
        assert_eq!(page, PageRequest::new(3, 10));
    }

    #[test]
    fn test_from_raw_defaults_on_invalid_input() {
        let config = ListingConfig::default();
        let page = PageRequest::from_raw(Some(&json!("abc")), Some(&json!(-4)), &config);
        assert_eq!(page, PageRequest::new(1, 5));

        let page = PageRequest::from_raw(Some(&json!(0)), None, &config);
        assert_eq!(page, PageRequest::new(1, 5));
    }

    #[test]
    fn test_huge_page_offset_saturates() {
        let config = ListingConfig::default();
        let page = PageRequest::from_raw(Some(&json!("9223372036854775807")), Some(&json!(5)), &config);
        assert_eq!(page.page, i64::MAX as u64);
        assert_eq!(page.offset(), u64::MAX);

        assert_eq!(PageRequest::new(u64::MAX, 100).offset(), u64::MAX);
    }

    #[test]
    fn test_from_raw_caps_limit() {
        let config = ListingConfig {
            default_limit: 5,
            max_limit: 50,
        };
        let page = PageRequest::from_raw(None, Some(&json!(500)), &config);
        assert_eq!(page.limit, 50);
    }

    #[test]
    fn test_envelope_field_names() {
        let response = PageResponse::new(vec![json!({"id": 1})], &PageRequest::new(2, 5), 12);
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value["currentPage"], 2);
        assert_eq!(value["itemsPerPage"], 5);
        assert_eq!(value["totalItems"], 12);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["data"][0]["id"], 1);
    }
}
