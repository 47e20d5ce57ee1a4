//! Database schema definitions.
//!
//! Contains the SQL schema for the threadify `SQLite` database.

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// SQL schema for initial database setup.
pub const SCHEMA_SQL: &str = r"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_info (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Source documents (long-form content awaiting conversion)
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE,
    title TEXT,
    body TEXT,  -- nullable: a document may exist before its body is written
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

-- One generated thread per document
CREATE TABLE IF NOT EXISTS threads (
    document_id INTEGER PRIMARY KEY,
    total_chunks INTEGER NOT NULL,
    estimated_read_minutes INTEGER NOT NULL,
    max_len INTEGER NOT NULL,  -- per-post budget the chunks were packed against
    created_at INTEGER NOT NULL,
    FOREIGN KEY (document_id) REFERENCES documents(id) ON DELETE CASCADE
);

-- Thread chunks, ordered 1..N within a document
CREATE TABLE IF NOT EXISTS thread_chunks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL,
    chunk_order INTEGER NOT NULL,
    text TEXT NOT NULL,
    UNIQUE (document_id, chunk_order),
    FOREIGN KEY (document_id) REFERENCES threads(document_id) ON DELETE CASCADE
);

-- Per-chunk publish outcomes
CREATE TABLE IF NOT EXISTS post_outcomes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL,
    chunk_order INTEGER NOT NULL,
    status TEXT NOT NULL,  -- posted | failed | skipped
    remote_id TEXT,
    reason TEXT,
    attempted_at INTEGER NOT NULL,
    FOREIGN KEY (document_id) REFERENCES documents(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_post_outcomes_document ON post_outcomes(document_id, chunk_order);
";

/// SQL to check if schema is initialized.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name='schema_info';
";

/// SQL to get schema version.
pub const GET_VERSION_SQL: &str = r"
SELECT value FROM schema_info WHERE key = 'version';
";

/// SQL to set schema version.
pub const SET_VERSION_SQL: &str = r"
INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?);
";
