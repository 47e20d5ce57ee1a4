//! Chunk representation.
//!
//! A chunk is one post of a thread: a bounded run of text together with
//! its 1-based position in the thread.

use serde::{Deserialize, Serialize};

/// One post-sized unit of a thread.
///
/// Consumers must publish or display chunks in ascending `order`.
///
/// # Examples
///
/// ```
/// use threadify::core::Chunk;
///
/// let chunk = Chunk::new(1, "Hello, world!");
/// assert_eq!(chunk.char_len(), 13);
/// assert_eq!(chunk.word_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chunk {
    /// Position within the thread, starting at 1.
    pub order: usize,

    /// Final rendered text of the post.
    pub text: String,
}

impl Chunk {
    /// Creates a new chunk.
    #[must_use]
    pub fn new(order: usize, text: impl Into<String>) -> Self {
        Self {
            order,
            text: text.into(),
        }
    }

    /// Length in characters (Unicode scalar values).
    ///
    /// This is the unit the per-post budget is measured in.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of whitespace-separated words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Returns true when the text fits within `max_len` characters.
    #[must_use]
    pub fn fits(&self, max_len: usize) -> bool {
        self.char_len() <= max_len
    }
}
