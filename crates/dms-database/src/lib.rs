//! # dms-database
//!
//! PostgreSQL connection management, the paginated list query builder, the
//! store traits consumed by the service layer, and their concrete
//! repository implementations.

pub mod connection;
pub mod migration;
pub mod query;
pub mod repositories;
pub mod row;
pub mod store;

pub use connection::DatabasePool;
pub use query::{ListQuery, QueryParam, build_list_query};
pub use store::{AccessLogStore, DocumentMasterStore, DocumentStore, ListStore, SoftDeletion};
