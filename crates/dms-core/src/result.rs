//! Convenience result type alias for the DMS backend.

use crate::error::AppError;

/// A specialized `Result` type for DMS operations.
pub type AppResult<T> = Result<T, AppError>;
