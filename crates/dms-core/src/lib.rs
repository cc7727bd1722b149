//! # dms-core
//!
//! Core crate for the DMS document-management backend. Contains the
//! storage trait, configuration schemas, typed identifiers, pagination and
//! search-field types, the response envelope, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DMS crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
