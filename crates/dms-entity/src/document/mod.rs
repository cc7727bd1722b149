//! Stored document entities.

pub mod model;

pub use model::{CreateDocument, Document, DocumentLocator, DocumentSummary};
