//! Response envelope for mutation operations.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Outcome class of a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Error,
    /// The request was rejected before any work was attempted.
    Fail,
}

/// Envelope returned by upload, delete, and document listing operations.
///
/// Serialized as `{responseCode, responseStatus, responseMessage,
/// responseData?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP-equivalent status code.
    pub response_code: u16,
    /// Outcome class.
    pub response_status: ResponseStatus,
    /// Human-readable message.
    pub response_message: String,
    /// Optional payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_data: Option<serde_json::Value>,
}

impl ApiResponse {
    /// A `200 success` envelope without payload.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            response_code: 200,
            response_status: ResponseStatus::Success,
            response_message: message.into(),
            response_data: None,
        }
    }

    /// A `200 success` envelope carrying a serializable payload.
    pub fn success_with<T: Serialize>(message: impl Into<String>, data: &T) -> Self {
        let mut response = Self::success(message);
        response.response_data = Some(serde_json::to_value(data).unwrap_or_default());
        response
    }

    /// A `fail` envelope for a rejected request, with an empty data list.
    pub fn fail(error: &AppError) -> Self {
        Self {
            response_code: error.status_code(),
            response_status: ResponseStatus::Fail,
            response_message: error.message.clone(),
            response_data: Some(serde_json::Value::Array(Vec::new())),
        }
    }

    /// Whether this envelope reports success.
    pub fn is_success(&self) -> bool {
        self.response_code == 200
    }
}

impl From<&AppError> for ApiResponse {
    fn from(error: &AppError) -> Self {
        Self {
            response_code: error.status_code(),
            response_status: ResponseStatus::Error,
            response_message: error.message.clone(),
            response_data: None,
        }
    }
}

impl From<AppError> for ApiResponse {
    fn from(error: AppError) -> Self {
        Self::from(&error)
    }
}
