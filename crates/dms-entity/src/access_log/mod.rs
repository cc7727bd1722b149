//! API access log entities.

pub mod model;

pub use model::{AccessLogEntry, AccessStatus, CreateAccessLogEntry};
