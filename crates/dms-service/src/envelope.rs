//! Conversion of service results into response envelopes.

use dms_core::error::ErrorKind;
use dms_core::result::AppResult;
use dms_core::types::ApiResponse;
use dms_entity::document::DocumentSummary;

use crate::upload::UploadedDocument;

/// Envelope for an upload result.
pub fn upload(result: &AppResult<UploadedDocument>) -> ApiResponse {
    match result {
        Ok(uploaded) => ApiResponse::success_with("Document uploaded successfully", uploaded),
        Err(e) => ApiResponse::from(e),
    }
}

/// Envelope for a delete result.
pub fn delete(result: &AppResult<()>) -> ApiResponse {
    match result {
        Ok(()) => ApiResponse::success("Document has been deleted successfully"),
        Err(e) => ApiResponse::from(e),
    }
}

/// Envelope for a listing by reference. Missing inputs yield a `fail`
/// envelope with an empty data list.
pub fn documents(result: &AppResult<Vec<DocumentSummary>>) -> ApiResponse {
    match result {
        Ok(list) => ApiResponse::success_with("Documents retrieved successfully", list),
        Err(e) if e.kind == ErrorKind::Validation => ApiResponse::fail(e),
        Err(e) => ApiResponse::from(e),
    }
}
