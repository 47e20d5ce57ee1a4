//! # threadify
//!
//! Turn long-form copy into social media threads.
//!
//! threadify takes free-form prose (blog posts, newsletters, notes) and
//! splits it into an ordered list of post-sized chunks that respect a
//! per-post character budget, framed by an optional title post and a
//! closing call-to-action.
//!
//! ## Features
//!
//! - **Conversion**: markdown stripping, structural segmentation and
//!   sentence packing, deterministic for identical input
//! - **`SQLite` Storage**: stored documents, threads and publish outcomes
//! - **Publishing**: pluggable posting sinks with reply chaining
//! - **Unicode Aware**: lengths in characters, hard wraps on grapheme
//!   boundaries
//!
//! ## Example
//!
//! ```
//! use threadify::ThreadConverter;
//!
//! let thread = ThreadConverter::new().convert("Ship it.\n\nThen measure.", Some("Launch notes"));
//! assert_eq!(thread.total_chunks, 4);
//! assert!(thread.chunks[0].text.starts_with("🧵 Launch notes"));
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod publish;
pub mod storage;
pub mod thread;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use crate::core::{Chunk, SourceDocument, ThreadResult, read_minutes};

// Re-export conversion types
pub use thread::{
    BatchItem, DEFAULT_MAX_LEN, OversizePolicy, ThreadConfig, ThreadConverter, convert_batch,
};

// Re-export storage types
pub use storage::{ContentStore, DEFAULT_DB_PATH, SqliteStore, StoreStats, StoredThread};

// Re-export publishing types
pub use publish::{
    ChunkOutcome, DirectorySink, FailurePolicy, MemorySink, PostStatus, PostingSink,
    PublishReport, publish_thread,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
