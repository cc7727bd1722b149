//! Document delete CLI command.

use clap::Args;

use super::Services;
use crate::output::{self, OutputFormat};
use dms_core::error::AppError;
use dms_core::types::{DocumentId, EnvironmentId, ModuleId};
use dms_service::{DeleteRequest, RequestContext, envelope};

/// Arguments for the delete command
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Document id
    #[arg(long)]
    pub id: i64,

    /// Module id
    #[arg(long)]
    pub module: i64,

    /// Environment id
    #[arg(long)]
    pub application_id: i64,

    /// Caller-side reference
    #[arg(long)]
    pub reference_id: String,

    /// Stored path of the file, as returned by upload
    #[arg(long)]
    pub filepath: String,
}

/// Execute the delete command
pub async fn execute(
    args: &DeleteArgs,
    services: &Services,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let request = DeleteRequest {
        id: DocumentId::new(args.id),
        module_id: ModuleId::new(args.module),
        env_id: EnvironmentId::new(args.application_id),
        ref_id: args.reference_id.clone(),
        filepath: args.filepath.clone(),
    };

    let result = services.deletes.delete(ctx, &request).await;
    let response = envelope::delete(&result);

    let body = serde_json::to_value(&request)?;
    services
        .access_log
        .record(ctx, &body, &response, Some(request.env_id))
        .await;

    output::print_envelope(&response, format);
    result
}
