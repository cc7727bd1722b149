//! # dms-service
//!
//! Business logic for the DMS backend. Services receive already-parsed
//! parameters, orchestrate the store traits and the storage provider, and
//! return typed results that [`envelope`] turns into response envelopes.
//!
//! All dependencies are injected at construction time as `Arc` handles.

pub mod audit;
pub mod context;
pub mod document;
pub mod envelope;
pub mod listing;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use audit::AccessLogService;
pub use context::RequestContext;
pub use document::{DeleteRequest, DeleteService, DocumentQuery, DocumentService};
pub use listing::{ListEntity, ListPage, ListService, ListingCatalog, ListingSpec};
pub use upload::{
    AllowedExtensions, UploadMetadata, UploadRequest, UploadService, UploadValidator,
    UploadedDocument,
};
