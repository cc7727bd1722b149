//! Core traits defined in `dms-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
