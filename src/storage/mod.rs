//! Storage layer for threadify.
//!
//! Provides persistent storage for source documents, generated threads and
//! publish outcomes using `SQLite`.

pub mod schema;
pub mod sqlite;
pub mod traits;

pub use schema::{CURRENT_SCHEMA_VERSION, SCHEMA_SQL};
pub use sqlite::SqliteStore;
pub use traits::{ContentStore, StoreStats, StoredThread};

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".threadify/threadify.db";
