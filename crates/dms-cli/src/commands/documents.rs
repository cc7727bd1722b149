//! Lookup of the documents attached to one reference.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use super::Services;
use crate::output::{self, OutputFormat};
use dms_core::error::AppError;
use dms_core::types::{EnvironmentId, ModuleId};
use dms_entity::document::DocumentSummary;
use dms_service::{DocumentQuery, envelope};

/// Arguments for the documents command
#[derive(Debug, Args)]
pub struct DocumentsArgs {
    /// Module id
    #[arg(long)]
    pub module: i64,

    /// Environment id
    #[arg(long)]
    pub application_id: i64,

    /// Caller-side reference
    #[arg(long)]
    pub reference_id: String,
}

/// Document display row
#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    /// ID
    id: i64,
    /// Type
    #[tabled(rename = "type")]
    doc_type: String,
    /// Original name
    name: String,
    /// Size in bytes
    size: i64,
    /// Stored path
    path: String,
    /// Created
    created: String,
}

impl From<&DocumentSummary> for DocumentRow {
    fn from(d: &DocumentSummary) -> Self {
        Self {
            id: d.id.get(),
            doc_type: d.doc_type.clone(),
            name: d.original_filename.clone(),
            size: d.filesize,
            path: d.filepath.clone(),
            created: d.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute the documents command
pub async fn execute(
    args: &DocumentsArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    let query = DocumentQuery::new(
        ModuleId::new(args.module),
        EnvironmentId::new(args.application_id),
        args.reference_id.clone(),
    );
    let result = services.documents.list_by_reference(&query).await;

    match format {
        OutputFormat::Json => output::print_envelope(&envelope::documents(&result), format),
        OutputFormat::Table => {
            if let Ok(documents) = &result {
                let rows: Vec<DocumentRow> = documents.iter().map(DocumentRow::from).collect();
                output::print_list(&rows, format);
            }
        }
    }

    result.map(|_| ())
}
