//! Paginated listing CLI command.

use clap::Args;
use serde_json::{Map, Value};

use super::Services;
use crate::output::{self, OutputFormat};
use dms_core::error::AppError;
use dms_service::ListEntity;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Entity to list: users, documents, access_logs, document_masters, app_configs
    pub entity: ListEntity,

    /// Page number, starting at 1
    #[arg(short, long)]
    pub page: Option<String>,

    /// Items per page
    #[arg(short, long)]
    pub limit: Option<String>,

    /// Search filter as name=value, e.g. username_search=tom (repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
}

impl ListArgs {
    /// The arguments as the JSON body a list request would carry.
    fn body(&self) -> Value {
        let mut body = Map::new();
        if let Some(page) = &self.page {
            body.insert("page".into(), Value::String(page.clone()));
        }
        if let Some(limit) = &self.limit {
            body.insert("limit".into(), Value::String(limit.clone()));
        }
        for (name, value) in &self.filters {
            body.insert(name.clone(), Value::String(value.clone()));
        }
        Value::Object(body)
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

/// Execute the list command
pub async fn execute(
    args: &ListArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    let request = services.listing.request_from_json(&args.body());
    let page = services.listing.list(args.entity, &request).await?;
    output::print_page(&page, format);
    Ok(())
}
