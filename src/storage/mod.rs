//! Storage module for the relational record sink
//!
//! This module handles the SQLite side of persistence:
//! - Database initialization and idempotent schema management
//! - Batched record inserts, one batch per page

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStore;
pub use traits::{RecordStore, StorageError, StorageResult};
