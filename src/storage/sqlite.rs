//! `SQLite` content store.
//!
//! Provides persistent storage using `SQLite` with transactional thread
//! replacement.

// SQLite stores all integers as i64. These casts are intentional and safe
// because we only store non-negative values that fit in usize.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

use crate::core::{Chunk, SourceDocument, ThreadResult};
use crate::error::{Result, StorageError};
use crate::publish::{ChunkOutcome, PostStatus};
use crate::storage::schema::{
    CHECK_SCHEMA_SQL, CURRENT_SCHEMA_VERSION, GET_VERSION_SQL, SCHEMA_SQL, SET_VERSION_SQL,
};
use crate::storage::traits::{ContentStore, StoreStats, StoredThread};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};

const DOCUMENT_COLUMNS: &str = "id, name, title, body, created_at";

/// SQLite-based content store.
///
/// # Examples
///
/// ```
/// use threadify::core::SourceDocument;
/// use threadify::storage::{ContentStore, SqliteStore};
///
/// let mut store = SqliteStore::in_memory().unwrap();
/// store.init().unwrap();
/// let id = store.add_document(&SourceDocument::new("Hello.")).unwrap();
/// assert!(store.get_document(id).unwrap().is_some());
/// ```
pub struct SqliteStore {
    /// `SQLite` connection.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// Creates the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Database(e.to_string()))?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;
        conn.execute("PRAGMA foreign_keys = ON;", [])
            .map_err(StorageError::from)?;
        // journal_mode returns a row, so it goes through query_row
        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        tracing::debug!(path = %path.display(), "opened store");
        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Creates an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        conn.execute("PRAGMA foreign_keys = ON;", [])
            .map_err(StorageError::from)?;
        Ok(Self { conn, path: None })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn get_schema_version(&self) -> Result<Option<u32>> {
        let version: Option<String> = self
            .conn
            .query_row(GET_VERSION_SQL, [], |row| row.get(0))
            .optional()
            .map_err(StorageError::from)?;
        Ok(version.and_then(|v| v.parse().ok()))
    }

    fn count(&self, sql: &str) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row(sql, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(n as usize)
    }

    fn row_to_document(row: &Row<'_>) -> rusqlite::Result<SourceDocument> {
        Ok(SourceDocument {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            title: row.get(2)?,
            body: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn row_to_outcome(row: &Row<'_>) -> rusqlite::Result<(i64, String, Option<String>, Option<String>)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    /// Returns current Unix timestamp.
    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

impl ContentStore for SqliteStore {
    fn init(&mut self) -> Result<()> {
        if !self.is_initialized()? {
            self.conn
                .execute_batch(SCHEMA_SQL)
                .map_err(StorageError::from)?;
            self.conn
                .execute(SET_VERSION_SQL, params![CURRENT_SCHEMA_VERSION.to_string()])
                .map_err(StorageError::from)?;
        }
        Ok(())
    }

    fn is_initialized(&self) -> Result<bool> {
        Ok(self.count(CHECK_SCHEMA_SQL)? > 0)
    }

    fn reset(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            DELETE FROM post_outcomes;
            DELETE FROM thread_chunks;
            DELETE FROM threads;
            DELETE FROM documents;
        ",
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    // ==================== Document Operations ====================

    fn add_document(&mut self, document: &SourceDocument) -> Result<i64> {
        self.conn
            .execute(
                r"
            INSERT INTO documents (name, title, body, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
        ",
                params![
                    document.name,
                    document.title,
                    document.body,
                    document.created_at,
                    Self::now()
                ],
            )
            .map_err(StorageError::from)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_document(&self, id: i64) -> Result<Option<SourceDocument>> {
        let doc = self
            .conn
            .query_row(
                &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?"),
                params![id],
                Self::row_to_document,
            )
            .optional()
            .map_err(StorageError::from)?;
        Ok(doc)
    }

    fn get_document_by_name(&self, name: &str) -> Result<Option<SourceDocument>> {
        let doc = self
            .conn
            .query_row(
                &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE name = ?"),
                params![name],
                Self::row_to_document,
            )
            .optional()
            .map_err(StorageError::from)?;
        Ok(doc)
    }

    fn list_documents(&self) -> Result<Vec<SourceDocument>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY id"))
            .map_err(StorageError::from)?;
        let docs = stmt
            .query_map([], Self::row_to_document)
            .map_err(StorageError::from)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StorageError::from)?;
        Ok(docs)
    }

    fn delete_document(&mut self, id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM documents WHERE id = ?", params![id])
            .map_err(StorageError::from)?;
        if deleted == 0 {
            return Err(StorageError::DocumentNotFound {
                identifier: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    // ==================== Thread Operations ====================

    fn save_thread(
        &mut self,
        document_id: i64,
        thread: &ThreadResult,
        max_len: usize,
    ) -> Result<()> {
        if self.get_document(document_id)?.is_none() {
            return Err(StorageError::DocumentNotFound {
                identifier: document_id.to_string(),
            }
            .into());
        }

        let tx = self
            .conn
            .transaction()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        {
            // Cascades to the previous thread's chunks.
            tx.execute("DELETE FROM threads WHERE document_id = ?", params![document_id])
                .map_err(StorageError::from)?;
            tx.execute(
                "DELETE FROM post_outcomes WHERE document_id = ?",
                params![document_id],
            )
            .map_err(StorageError::from)?;
            tx.execute(
                r"
                INSERT INTO threads
                    (document_id, total_chunks, estimated_read_minutes, max_len, created_at)
                VALUES (?, ?, ?, ?, ?)
            ",
                params![
                    document_id,
                    thread.total_chunks as i64,
                    thread.estimated_read_minutes as i64,
                    max_len as i64,
                    Self::now()
                ],
            )
            .map_err(StorageError::from)?;

            let mut stmt = tx
                .prepare(
                    "INSERT INTO thread_chunks (document_id, chunk_order, text) VALUES (?, ?, ?)",
                )
                .map_err(StorageError::from)?;
            for chunk in &thread.chunks {
                stmt.execute(params![document_id, chunk.order as i64, chunk.text])
                    .map_err(StorageError::from)?;
            }
        }
        tx.commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        tracing::debug!(document_id, chunks = thread.total_chunks, "saved thread");
        Ok(())
    }

    fn load_thread(&self, document_id: i64) -> Result<Option<StoredThread>> {
        let header: Option<(i64, i64, i64)> = self
            .conn
            .query_row(
                r"
                SELECT total_chunks, estimated_read_minutes, max_len
                FROM threads WHERE document_id = ?
            ",
                params![document_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()
            .map_err(StorageError::from)?;
        let Some((total_chunks, read_minutes, max_len)) = header else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare(
                "SELECT chunk_order, text FROM thread_chunks WHERE document_id = ? ORDER BY chunk_order",
            )
            .map_err(StorageError::from)?;
        let chunks = stmt
            .query_map(params![document_id], |row| {
                let order: i64 = row.get(0)?;
                Ok(Chunk::new(order as usize, row.get::<_, String>(1)?))
            })
            .map_err(StorageError::from)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StorageError::from)?;

        Ok(Some(StoredThread {
            max_len: max_len as usize,
            thread: ThreadResult {
                chunks,
                total_chunks: total_chunks as usize,
                estimated_read_minutes: read_minutes as usize,
            },
        }))
    }

    // ==================== Outcome Operations ====================

    fn record_outcomes(&mut self, document_id: i64, outcomes: &[ChunkOutcome]) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        let now = Self::now();
        {
            let mut stmt = tx
                .prepare(
                    r"
                INSERT INTO post_outcomes (document_id, chunk_order, status, remote_id, reason, attempted_at)
                VALUES (?, ?, ?, ?, ?, ?)
            ",
                )
                .map_err(StorageError::from)?;
            for outcome in outcomes {
                let (remote_id, reason) = match &outcome.status {
                    PostStatus::Posted { remote_id } => (Some(remote_id.as_str()), None),
                    PostStatus::Failed { reason } => (None, Some(reason.as_str())),
                    PostStatus::Skipped => (None, None),
                };
                stmt.execute(params![
                    document_id,
                    outcome.order as i64,
                    outcome.status.label(),
                    remote_id,
                    reason,
                    now
                ])
                .map_err(StorageError::from)?;
            }
        }
        tx.commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(())
    }

    fn list_outcomes(&self, document_id: i64) -> Result<Vec<ChunkOutcome>> {
        let mut stmt = self
            .conn
            .prepare(
                r"
            SELECT chunk_order, status, remote_id, reason FROM post_outcomes
            WHERE document_id = ? ORDER BY id
        ",
            )
            .map_err(StorageError::from)?;
        let rows = stmt
            .query_map(params![document_id], Self::row_to_outcome)
            .map_err(StorageError::from)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(order, status, remote_id, reason)| {
                let status = match status.as_str() {
                    "posted" => PostStatus::Posted {
                        remote_id: remote_id.unwrap_or_default(),
                    },
                    "failed" => PostStatus::Failed {
                        reason: reason.unwrap_or_default(),
                    },
                    "skipped" => PostStatus::Skipped,
                    other => {
                        return Err(crate::Error::from(StorageError::Serialization(format!(
                            "unknown status: {other}"
                        ))));
                    }
                };
                Ok(ChunkOutcome {
                    order: order as usize,
                    status,
                })
            })
            .collect()
    }

    fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            document_count: self.count("SELECT COUNT(*) FROM documents")?,
            thread_count: self.count("SELECT COUNT(*) FROM threads")?,
            chunk_count: self.count("SELECT COUNT(*) FROM thread_chunks")?,
            outcome_count: self.count("SELECT COUNT(*) FROM post_outcomes")?,
            schema_version: self.get_schema_version()?.unwrap_or(0),
            db_size: self
                .path
                .as_ref()
                .and_then(|p| std::fs::metadata(p).ok().map(|m| m.len())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::{DEFAULT_MAX_LEN, ThreadConverter};

    fn store() -> SqliteStore {
        let mut store = SqliteStore::in_memory().unwrap();
        store.init().unwrap();
        store
    }

    #[test]
    fn test_init_idempotent() {
        let mut store = store();
        store.init().unwrap();
        assert!(store.is_initialized().unwrap());
        assert_eq!(store.stats().unwrap().schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_uninitialized() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(!store.is_initialized().unwrap());
    }

    #[test]
    fn test_document_crud() {
        let mut store = store();
        let doc = SourceDocument::new("Body.")
            .with_name("launch")
            .with_title("Launch");
        let id = store.add_document(&doc).unwrap();

        let loaded = store.get_document(id).unwrap().unwrap();
        assert_eq!(loaded.id, Some(id));
        assert_eq!(loaded.body.as_deref(), Some("Body."));
        assert_eq!(loaded.title.as_deref(), Some("Launch"));

        let by_name = store.get_document_by_name("launch").unwrap().unwrap();
        assert_eq!(by_name.id, Some(id));
        assert!(store.get_document_by_name("missing").unwrap().is_none());

        assert_eq!(store.list_documents().unwrap().len(), 1);

        store.delete_document(id).unwrap();
        assert!(store.get_document(id).unwrap().is_none());
        assert!(store.delete_document(id).is_err());
    }

    #[test]
    fn test_null_body_round_trip() {
        let mut store = store();
        let id = store.add_document(&SourceDocument::without_body()).unwrap();
        let loaded = store.get_document(id).unwrap().unwrap();
        assert!(loaded.body.is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut store = store();
        store
            .add_document(&SourceDocument::new("a").with_name("dup"))
            .unwrap();
        assert!(
            store
                .add_document(&SourceDocument::new("b").with_name("dup"))
                .is_err()
        );
    }

    #[test]
    fn test_save_and_load_thread() {
        let mut store = store();
        let id = store.add_document(&SourceDocument::new("x")).unwrap();
        let thread = ThreadConverter::new().convert("One.\n\nTwo.", Some("Title"));

        assert!(store.load_thread(id).unwrap().is_none());
        store.save_thread(id, &thread, DEFAULT_MAX_LEN).unwrap();
        assert_eq!(
            store.load_thread(id).unwrap(),
            Some(StoredThread {
                max_len: DEFAULT_MAX_LEN,
                thread
            })
        );
    }

    #[test]
    fn test_thread_keeps_its_max_len() {
        let mut store = store();
        let id = store.add_document(&SourceDocument::new("x")).unwrap();
        let thread = ThreadConverter::new().convert("One.", None);

        store.save_thread(id, &thread, 500).unwrap();
        assert_eq!(store.load_thread(id).unwrap().unwrap().max_len, 500);

        store.save_thread(id, &thread, 140).unwrap();
        assert_eq!(store.load_thread(id).unwrap().unwrap().max_len, 140);
    }

    #[test]
    fn test_save_thread_replaces_previous() {
        let mut store = store();
        let id = store.add_document(&SourceDocument::new("x")).unwrap();
        let converter = ThreadConverter::new();

        store
            .save_thread(id, &converter.convert("A.\n\nB.\n\nC.", None), 280)
            .unwrap();
        let second = converter.convert("Only one.", None);
        store.save_thread(id, &second, 280).unwrap();

        assert_eq!(store.load_thread(id).unwrap().unwrap().thread, second);
        assert_eq!(store.stats().unwrap().chunk_count, 2);
    }

    #[test]
    fn test_save_thread_unknown_document() {
        let mut store = store();
        let thread = ThreadConverter::new().convert("", None);
        let err = store.save_thread(42, &thread, DEFAULT_MAX_LEN).unwrap_err();
        assert!(err.to_string().contains("document not found"));
    }

    #[test]
    fn test_outcomes_round_trip() {
        let mut store = store();
        let id = store.add_document(&SourceDocument::new("x")).unwrap();
        let outcomes = vec![
            ChunkOutcome {
                order: 1,
                status: PostStatus::Posted {
                    remote_id: "r1".to_string(),
                },
            },
            ChunkOutcome {
                order: 2,
                status: PostStatus::Failed {
                    reason: "rate limited".to_string(),
                },
            },
            ChunkOutcome {
                order: 3,
                status: PostStatus::Skipped,
            },
        ];
        store.record_outcomes(id, &outcomes).unwrap();
        assert_eq!(store.list_outcomes(id).unwrap(), outcomes);
    }

    #[test]
    fn test_resaving_thread_clears_outcomes() {
        let mut store = store();
        let id = store.add_document(&SourceDocument::new("x")).unwrap();
        let converter = ThreadConverter::new();
        store
            .save_thread(id, &converter.convert("A.\n\nB.", None), DEFAULT_MAX_LEN)
            .unwrap();
        store
            .record_outcomes(
                id,
                &[ChunkOutcome {
                    order: 2,
                    status: PostStatus::Posted {
                        remote_id: "r2".to_string(),
                    },
                }],
            )
            .unwrap();

        store
            .save_thread(id, &converter.convert("Only one.", None), DEFAULT_MAX_LEN)
            .unwrap();
        assert!(store.list_outcomes(id).unwrap().is_empty());
        assert_eq!(store.stats().unwrap().outcome_count, 0);
    }

    #[test]
    fn test_delete_cascades() {
        let mut store = store();
        let id = store.add_document(&SourceDocument::new("x")).unwrap();
        store
            .save_thread(id, &ThreadConverter::new().convert("One.", None), 280)
            .unwrap();
        store
            .record_outcomes(
                id,
                &[ChunkOutcome {
                    order: 1,
                    status: PostStatus::Skipped,
                }],
            )
            .unwrap();

        store.delete_document(id).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.thread_count, 0);
        assert_eq!(stats.chunk_count, 0);
        assert_eq!(stats.outcome_count, 0);
    }

    #[test]
    fn test_reset() {
        let mut store = store();
        let id = store.add_document(&SourceDocument::new("x")).unwrap();
        store
            .save_thread(id, &ThreadConverter::new().convert("One.", None), 280)
            .unwrap();
        store.reset().unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.document_count, 0);
        assert_eq!(stats.chunk_count, 0);
        assert!(store.is_initialized().unwrap());
    }
}
