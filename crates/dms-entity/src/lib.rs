//! # dms-entity
//!
//! Domain entity models for the DMS backend. Every struct in this crate
//! represents a database table row or the data needed to insert one.
//! Database entities derive `sqlx::FromRow`.

pub mod access_log;
pub mod document;
pub mod document_master;
