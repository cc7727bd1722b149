//! PostgreSQL implementations of the store traits.

pub mod access_log;
pub mod document;
pub mod document_master;
pub mod listing;

pub use access_log::AccessLogRepository;
pub use document::DocumentRepository;
pub use document_master::DocumentMasterRepository;
pub use listing::ListingRepository;
