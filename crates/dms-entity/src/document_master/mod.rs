//! Per-(environment, module, type) upload configuration.

pub mod model;

pub use model::{ACTIVE_STATUS, DocumentMaster};
