//! Content store trait definition.
//!
//! The content store is where the conversion workflow fetches source text
//! and persists the resulting chunks and publish outcomes.

use crate::core::{SourceDocument, ThreadResult};
use crate::error::Result;
use crate::publish::ChunkOutcome;
use serde::Serialize;

/// Trait for persistent content stores.
///
/// Implementations should make each multi-row write atomic.
pub trait ContentStore {
    /// Initializes storage (creates schema).
    ///
    /// Should be idempotent - safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    fn init(&mut self) -> Result<()>;

    /// Checks if storage is initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    fn is_initialized(&self) -> Result<bool>;

    /// Deletes all data but preserves the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn reset(&mut self) -> Result<()>;

    // ==================== Document Operations ====================

    /// Adds a document and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be inserted (e.g. the name
    /// is taken).
    fn add_document(&mut self, document: &SourceDocument) -> Result<i64>;

    /// Retrieves a document by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_document(&self, id: i64) -> Result<Option<SourceDocument>>;

    /// Retrieves a document by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_document_by_name(&self, name: &str) -> Result<Option<SourceDocument>>;

    /// Lists all documents, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_documents(&self) -> Result<Vec<SourceDocument>>;

    /// Deletes a document with its thread and outcomes.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn delete_document(&mut self, id: i64) -> Result<()>;

    // ==================== Thread Operations ====================

    /// Stores the thread for a document together with the `max_len` it was
    /// packed against, replacing any previous thread.
    ///
    /// Outcomes recorded for the previous thread are discarded, since their
    /// chunk orders no longer refer to anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not exist or the write fails.
    fn save_thread(
        &mut self,
        document_id: i64,
        thread: &ThreadResult,
        max_len: usize,
    ) -> Result<()>;

    /// Loads the stored thread for a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn load_thread(&self, document_id: i64) -> Result<Option<StoredThread>>;

    // ==================== Outcome Operations ====================

    /// Appends publish outcomes for a document.
    ///
    /// # Errors
    ///
    /// Returns an error if insertion fails.
    fn record_outcomes(&mut self, document_id: i64, outcomes: &[ChunkOutcome]) -> Result<()>;

    /// Lists recorded outcomes for a document, in attempt order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_outcomes(&self, document_id: i64) -> Result<Vec<ChunkOutcome>>;

    /// Gets storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if statistics cannot be gathered.
    fn stats(&self) -> Result<StoreStats>;
}

/// A persisted thread and the per-post budget it was generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredThread {
    /// Character budget the thread was packed against.
    pub max_len: usize,
    /// The thread itself.
    pub thread: ThreadResult,
}

/// Storage statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of documents stored.
    pub document_count: usize,
    /// Number of documents with a generated thread.
    pub thread_count: usize,
    /// Total number of chunks across all threads.
    pub chunk_count: usize,
    /// Number of recorded publish outcomes.
    pub outcome_count: usize,
    /// Schema version.
    pub schema_version: u32,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}
