//! Operations on stored documents: soft delete and listing by reference.

pub mod delete;
pub mod service;

pub use delete::{DeleteRequest, DeleteService};
pub use service::{DocumentQuery, DocumentService};
