//! In-memory posting sink.

use crate::core::Chunk;
use crate::error::PublishError;
use crate::publish::PostingSink;

/// A post captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPost {
    /// Id assigned by the sink.
    pub remote_id: String,
    /// Id of the post this one replies to.
    pub in_reply_to: Option<String>,
    /// Post text.
    pub text: String,
}

/// Sink that keeps posts in memory. Used for dry runs.
///
/// # Examples
///
/// ```
/// use threadify::publish::{FailurePolicy, MemorySink, publish_thread};
/// use threadify::thread::ThreadConverter;
///
/// let thread = ThreadConverter::new().convert("Hello.", None);
/// let mut sink = MemorySink::new();
/// let report = publish_thread(&mut sink, &thread, FailurePolicy::StopOnFailure);
/// assert!(report.is_complete());
/// assert_eq!(sink.posts().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    posts: Vec<CapturedPost>,
    reject_orders: Vec<usize>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the sink reject the chunks at the given orders.
    #[must_use]
    pub fn rejecting(mut self, orders: &[usize]) -> Self {
        self.reject_orders = orders.to_vec();
        self
    }

    /// Posts accepted so far.
    #[must_use]
    pub fn posts(&self) -> &[CapturedPost] {
        &self.posts
    }
}

impl PostingSink for MemorySink {
    fn post(&mut self, chunk: &Chunk, in_reply_to: Option<&str>) -> Result<String, PublishError> {
        if self.reject_orders.contains(&chunk.order) {
            return Err(PublishError::Rejected {
                reason: format!("post {} refused", chunk.order),
            });
        }
        let remote_id = format!("memory-{}", self.posts.len() + 1);
        self.posts.push(CapturedPost {
            remote_id: remote_id.clone(),
            in_reply_to: in_reply_to.map(ToString::to_string),
            text: chunk.text.clone(),
        });
        Ok(remote_id)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
