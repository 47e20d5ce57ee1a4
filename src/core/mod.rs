//! Core domain models for threadify.
//!
//! Source documents, chunks and threads. These are pure domain models
//! with no I/O dependencies.

pub mod chunk;
pub mod document;
pub mod thread;

pub use chunk::Chunk;
pub use document::SourceDocument;
pub use thread::{ThreadResult, read_minutes};
