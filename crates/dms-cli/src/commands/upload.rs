//! File upload CLI command.

use std::path::PathBuf;

use bytes::Bytes;
use clap::Args;
use serde_json::{Value, json};

use super::Services;
use crate::output::{self, OutputFormat};
use dms_core::error::AppError;
use dms_service::{RequestContext, UploadMetadata, envelope};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Raw metadata JSON, e.g. '{"method":"invoice","module":2,"application_id":1,"reference_id":"R-1"}'
    #[arg(short, long, conflicts_with_all = ["method", "module", "application_id", "reference_id", "parent_id"])]
    pub data: Option<String>,

    /// Document type
    #[arg(long)]
    pub method: Option<String>,

    /// Module id
    #[arg(long)]
    pub module: Option<String>,

    /// Environment id
    #[arg(long)]
    pub application_id: Option<String>,

    /// Caller-side reference
    #[arg(long)]
    pub reference_id: Option<String>,

    /// Parent reference
    #[arg(long)]
    pub parent_id: Option<String>,

    /// Override file name
    #[arg(short, long)]
    pub name: Option<String>,
}

impl UploadArgs {
    fn metadata_text(&self) -> String {
        match &self.data {
            Some(raw) => raw.clone(),
            None => json!({
                "method": self.method,
                "module": self.module,
                "application_id": self.application_id,
                "reference_id": self.reference_id,
                "parent_id": self.parent_id,
            })
            .to_string(),
        }
    }

    fn file_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload")
                .to_string()
        })
    }
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    services: &Services,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    if !tokio::fs::try_exists(&args.file).await.unwrap_or(false) {
        return Err(AppError::not_found(format!(
            "File not found: {}",
            args.file.display()
        )));
    }

    let content = tokio::fs::read(&args.file).await?;
    let file_name = args.file_name();
    let file_size = content.len();
    let metadata = args.metadata_text();

    let mut env_id = None;
    let result = match UploadMetadata::from_json_str(&metadata)
        .and_then(|m| m.into_request(file_name.clone(), Bytes::from(content)))
    {
        Ok(request) => {
            env_id = Some(request.env_id);
            services.uploads.upload(ctx, request).await
        }
        Err(e) => Err(e),
    };

    let response = envelope::upload(&result);
    let body = json!({
        "data": serde_json::from_str::<Value>(&metadata).unwrap_or(Value::String(metadata)),
        "fileName": file_name,
        "fileSize": file_size,
    });
    services.access_log.record(ctx, &body, &response, env_id).await;

    output::print_envelope(&response, format);
    result.map(|_| ())
}
