//! Decoder for the operator-entered `allowed_extension` column.
//!
//! Operators store the list loosely: `["pdf", "jpg"]`, `['pdf', 'jpg']`, or
//! `[".PDF", " Jpg "]` are all accepted and mean the same thing.

use std::collections::BTreeSet;

use serde_json::Value;

use dms_core::error::AppError;
use dms_core::result::AppResult;

/// Normalized set of allowed extensions: lower case, no leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedExtensions(BTreeSet<String>);

impl AllowedExtensions {
    /// Decode the stored list text.
    ///
    /// Strict JSON is tried first, then the text again with single quotes
    /// turned into double quotes. Anything that is not a list, or a list
    /// that normalizes to nothing, is a configuration error.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(_) => serde_json::from_str::<Value>(&raw.replace('\'', "\"")).map_err(|e| {
                AppError::configuration(format!(
                    "Invalid format for 'allowed_extension'. Error: {e}"
                ))
            })?,
        };

        let Value::Array(items) = value else {
            return Err(AppError::configuration(
                "Invalid format for 'allowed_extension'. Error: expected a list",
            ));
        };

        let set: BTreeSet<String> = items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(normalize(s)),
                Value::Number(n) => Some(normalize(&n.to_string())),
                _ => None,
            })
            .filter(|ext| !ext.is_empty())
            .collect();

        if set.is_empty() {
            return Err(AppError::configuration(
                "Allowed_extension configuration is empty or invalid after parsing.",
            ));
        }
        Ok(Self(set))
    }

    /// Whether `extension` is allowed, compared case-insensitively.
    pub fn contains(&self, extension: &str) -> bool {
        self.0.contains(&normalize(extension))
    }

    /// The allowed extensions sorted and joined with `", "`.
    pub fn describe(&self) -> String {
        self.0.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

fn normalize(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
