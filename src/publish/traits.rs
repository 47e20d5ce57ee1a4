//! Posting sink trait definition.

use crate::core::Chunk;
use crate::error::PublishError;

/// A destination that publishes chunks one at a time.
///
/// Each call creates one post. `in_reply_to` carries the remote id of the
/// previous post in the thread, or `None` for the first post.
pub trait PostingSink {
    /// Publishes one chunk and returns the remote id of the created post.
    ///
    /// # Errors
    ///
    /// Returns a [`PublishError`] if the post was rejected or could not be
    /// delivered.
    fn post(&mut self, chunk: &Chunk, in_reply_to: Option<&str>) -> Result<String, PublishError>;

    /// Returns the name of the sink.
    fn name(&self) -> &'static str;
}
