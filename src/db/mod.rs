//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: the row struct shared by both resource kinds
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool setup and the per-kind statements

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::DbAcceptedRow;
pub use schema::SQLITE_INIT;
pub use sqlite::{AcceptedStorage, SqlitePool, open, open_with_fallback};
