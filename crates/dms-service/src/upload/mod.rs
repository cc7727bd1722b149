//! Document upload: metadata decoding, validation against the document-type
//! configuration, and the storage pipeline.

pub mod extensions;
pub mod request;
pub mod service;
pub mod validation;

pub use extensions::AllowedExtensions;
pub use request::{UploadMetadata, UploadRequest, UploadedDocument};
pub use service::UploadService;
pub use validation::{UploadValidator, ValidatedUpload};
