//! Error types for threadify operations.
//!
//! This module provides the error hierarchy using `thiserror` for
//! conversion, storage, I/O, publishing and CLI commands.

use thiserror::Error;

/// Result type alias for threadify operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Thread conversion errors.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Storage-related errors (database operations).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Posting sink errors.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Errors raised by the thread converter.
///
/// There is a single kind: the input could not be treated as text. The
/// caller should sanitize the input and retry; retrying unchanged input
/// fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Content was missing or not valid text.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected.
        reason: String,
    },
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// Storage not initialized (init command not run).
    #[error("store not initialized. Run: threadify init")]
    NotInitialized,

    /// Document not found by ID or name.
    #[error("document not found: {identifier}")]
    DocumentNotFound {
        /// Document ID or name that was not found.
        identifier: String,
    },

    /// No thread has been generated for the document yet.
    #[error("no thread stored for document {document_id}")]
    ThreadNotFound {
        /// Document the thread was requested for.
        document_id: i64,
    },

    /// Transaction error.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

/// Errors reported by a posting sink for a single post.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// The destination refused the post.
    #[error("post rejected: {reason}")]
    Rejected {
        /// Reason given by the sink.
        reason: String,
    },

    /// The sink could not deliver the post.
    #[error("delivery failed: {reason}")]
    Delivery {
        /// Underlying failure.
        reason: String,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<std::str::Utf8Error> for ConversionError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::InvalidInput {
            reason: format!("invalid UTF-8 at byte offset {}", err.valid_up_to()),
        }
    }
}

impl From<std::string::FromUtf8Error> for ConversionError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        err.utf8_error().into()
    }
}
