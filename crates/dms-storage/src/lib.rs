//! # dms-storage
//!
//! Local filesystem storage for uploaded documents and the naming rules for
//! where an upload lands on disk.

pub mod layout;
pub mod providers;

pub use layout::{StoragePath, file_extension, secure_filename};
pub use providers::local::LocalStorageProvider;
