//! Audit trail of API operations.

pub mod access_log;

pub use access_log::AccessLogService;
