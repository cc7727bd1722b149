//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use serde_json::{Map, Value};
use tabled::builder::Builder;
use tabled::{Table, Tabled};

use dms_core::types::ApiResponse;
use dms_service::ListPage;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(items, "[]"),
    }
}

/// Print a response envelope. Table mode prints successes only, as the
/// outcome line followed by the payload fields; failures surface through
/// the command's error.
pub fn print_envelope(response: &ApiResponse, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if !response.is_success() {
                return;
            }
            print_success(&response.response_message);
            if let Some(Value::Object(data)) = &response.response_data {
                for (key, value) in data {
                    print_kv(key, &cell(value));
                }
            }
        }
        OutputFormat::Json => print_json(response, "{}"),
    }
}

/// Print one page of untyped rows with its pagination footer.
pub fn print_page(page: &ListPage, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if page.items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", row_table(&page.items));
            }
            println!(
                "Page {} of {} ({} items, {} per page)",
                page.current_page, page.total_pages, page.total_items, page.items_per_page
            );
        }
        OutputFormat::Json => print_json(page, "{}"),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}

fn print_json<T: Serialize + ?Sized>(value: &T, fallback: &str) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string());
    println!("{}", json);
}

/// Columns follow the key order of the first row.
fn row_table(rows: &[Map<String, Value>]) -> Table {
    let headers: Vec<String> = rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(cell).unwrap_or_default()),
        );
    }
    builder.build()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_row_table_uses_first_row_columns() {
        let rows: Vec<Map<String, Value>> = vec![
            json!({"id": 1, "username": "tom", "email": null})
                .as_object()
                .cloned()
                .unwrap(),
            json!({"id": 2, "username": "tomas"})
                .as_object()
                .cloned()
                .unwrap(),
        ];
        let rendered = row_table(&rows).to_string();
        assert!(rendered.contains("username"));
        assert!(rendered.contains("tomas"));
        assert!(!rendered.contains("null"));
    }

    #[test]
    fn test_cell_strips_string_quotes() {
        assert_eq!(cell(&json!("a")), "a");
        assert_eq!(cell(&json!(12)), "12");
        assert_eq!(cell(&json!(true)), "true");
    }
}
