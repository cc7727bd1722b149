//! Paginated listing of the admin-visible tables.

pub mod catalog;
pub mod service;

pub use catalog::{ListEntity, ListingCatalog, ListingSpec};
pub use service::{ListPage, ListService};
