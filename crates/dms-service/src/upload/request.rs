//! Upload inputs and output.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use dms_core::error::{AppError, ErrorKind};
use dms_core::result::AppResult;
use dms_core::types::{DocumentId, EnvironmentId, ModuleId};

/// Message for any missing required upload field.
pub const MISSING_METADATA: &str =
    "Missing required metadata fields: method, module, application_id, or reference_id.";

fn missing_metadata(errors: ValidationErrors) -> AppError {
    AppError::with_source(ErrorKind::Validation, MISSING_METADATA, errors)
}

/// The JSON `data` form field sent alongside an uploaded file.
///
/// `module` and `application_id` may be JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UploadMetadata {
    /// Document type.
    #[validate(required)]
    pub method: Option<String>,
    /// Module id.
    #[validate(required)]
    pub module: Option<Value>,
    /// Environment id.
    #[validate(required)]
    pub application_id: Option<Value>,
    /// Caller-side reference.
    #[validate(required)]
    pub reference_id: Option<Value>,
    /// Optional parent reference.
    #[serde(default)]
    pub parent_id: Option<Value>,
}

impl UploadMetadata {
    /// Decode the metadata text.
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::with_source(ErrorKind::Validation, "Invalid JSON format in 'data'.", e)
        })
    }

    /// Check required fields and combine them with the file into a request.
    pub fn into_request(self, file_name: impl Into<String>, data: Bytes) -> AppResult<UploadRequest> {
        self.validate().map_err(missing_metadata)?;

        let doc_type = self
            .method
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::validation(MISSING_METADATA))?;
        let module_id = required_id("module", self.module.as_ref())?;
        let env_id = required_id("application_id", self.application_id.as_ref())?;
        let ref_id = self
            .reference_id
            .as_ref()
            .and_then(text_value)
            .ok_or_else(|| AppError::validation(MISSING_METADATA))?;
        let parent_id = self.parent_id.as_ref().and_then(text_value);

        let request = UploadRequest {
            env_id: EnvironmentId::new(env_id),
            module_id: ModuleId::new(module_id),
            doc_type: doc_type.to_string(),
            ref_id,
            parent_id,
            file_name: file_name.into(),
            data,
        };
        request.validate().map_err(missing_metadata)?;
        Ok(request)
    }
}

/// Integer from a JSON number or numeric string. Zero counts as missing.
fn required_id(field: &str, value: Option<&Value>) -> AppResult<i64> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.trim().parse::<i64>().map_err(|_| {
            AppError::validation(format!("Invalid '{field}' value. Must be an integer."))
        })?),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(AppError::validation(format!(
                "Invalid '{field}' value. Must be an integer."
            )));
        }
    };
    parsed
        .filter(|v| *v != 0)
        .ok_or_else(|| AppError::validation(MISSING_METADATA))
}

/// Non-blank text from a JSON string or number.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A decoded upload ready for the pipeline.
#[derive(Debug, Clone, Validate)]
pub struct UploadRequest {
    /// Owning environment.
    pub env_id: EnvironmentId,
    /// Owning module.
    pub module_id: ModuleId,
    /// Document type key.
    #[validate(length(min = 1))]
    pub doc_type: String,
    /// Caller-side reference.
    #[validate(length(min = 1))]
    pub ref_id: String,
    /// Optional parent reference.
    pub parent_id: Option<String>,
    /// Client-supplied file name.
    #[validate(length(min = 1))]
    pub file_name: String,
    /// File content.
    pub data: Bytes,
}

impl UploadRequest {
    /// Reject blank required fields.
    pub fn check(&self) -> AppResult<()> {
        self.validate().map_err(missing_metadata)
    }
}

/// What a successful upload reports back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedDocument {
    /// New document id.
    pub id: DocumentId,
    /// Document type.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Sanitized original file name.
    pub name: String,
    /// Full path of the stored file.
    pub path: String,
    /// Generated file name.
    #[serde(rename = "fileName")]
    pub file_name: String,
}
