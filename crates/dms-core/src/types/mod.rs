//! Core type definitions used across the DMS workspace.

pub mod id;
pub mod pagination;
pub mod response;
pub mod search;

pub use id::*;
pub use pagination::{PageRequest, PageResponse};
pub use response::{ApiResponse, ResponseStatus};
pub use search::{Comparison, ListQueryRequest, SearchFieldSpec, ValueType};
