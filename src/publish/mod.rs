//! Thread publishing.
//!
//! Hands the chunks of a thread to a [`PostingSink`] in order, each post
//! replying to the previous one, and reports the outcome of every chunk.

pub mod directory;
pub mod memory;
pub mod traits;

pub use directory::DirectorySink;
pub use memory::{CapturedPost, MemorySink};
pub use traits::PostingSink;

use crate::core::ThreadResult;
use serde::{Deserialize, Serialize};

/// What to do after a post fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Skip every remaining chunk.
    #[default]
    StopOnFailure,
    /// Keep posting, replying to the last successful post.
    ContinueOnFailure,
}

/// Result of publishing one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PostStatus {
    /// The chunk was published.
    Posted {
        /// Id assigned by the sink.
        remote_id: String,
    },
    /// The sink refused or failed to publish the chunk.
    Failed {
        /// Failure description.
        reason: String,
    },
    /// The chunk was not attempted.
    Skipped,
}

impl PostStatus {
    /// Short status label, as stored.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Posted { .. } => "posted",
            Self::Failed { .. } => "failed",
            Self::Skipped => "skipped",
        }
    }
}

/// Outcome for the chunk at `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkOutcome {
    /// Order of the chunk in the thread.
    pub order: usize,
    /// What happened to it.
    #[serde(flatten)]
    pub status: PostStatus,
}

/// Outcomes of one publish run, one per chunk in thread order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    /// Name of the sink used.
    pub sink: &'static str,
    /// Per-chunk outcomes.
    pub outcomes: Vec<ChunkOutcome>,
}

impl PublishReport {
    /// Number of chunks published.
    #[must_use]
    pub fn posted_count(&self) -> usize {
        self.count(|s| matches!(s, PostStatus::Posted { .. }))
    }

    /// Number of chunks that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, PostStatus::Failed { .. }))
    }

    /// Number of chunks not attempted.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, PostStatus::Skipped))
    }

    /// Returns true if every chunk was published.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.posted_count() == self.outcomes.len()
    }

    fn count(&self, pred: impl Fn(&PostStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Publishes a thread through `sink` in chunk order.
///
/// Never fails as a whole: every chunk gets an outcome.
pub fn publish_thread<S: PostingSink + ?Sized>(
    sink: &mut S,
    thread: &ThreadResult,
    policy: FailurePolicy,
) -> PublishReport {
    let mut outcomes = Vec::with_capacity(thread.chunks.len());
    let mut previous: Option<String> = None;
    let mut halted = false;

    for chunk in &thread.chunks {
        let status = if halted {
            PostStatus::Skipped
        } else {
            match sink.post(chunk, previous.as_deref()) {
                Ok(remote_id) => {
                    tracing::debug!(order = chunk.order, %remote_id, "posted chunk");
                    previous = Some(remote_id.clone());
                    PostStatus::Posted { remote_id }
                }
                Err(e) => {
                    tracing::warn!(order = chunk.order, error = %e, "post failed");
                    halted = policy == FailurePolicy::StopOnFailure;
                    PostStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        };
        outcomes.push(ChunkOutcome {
            order: chunk.order,
            status,
        });
    }

    let report = PublishReport {
        sink: sink.name(),
        outcomes,
    };
    tracing::info!(
        sink = report.sink,
        posted = report.posted_count(),
        failed = report.failed_count(),
        skipped = report.skipped_count(),
        "publish finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::ThreadConverter;

    fn thread() -> ThreadResult {
        ThreadConverter::new().convert("First point.\n\nSecond point.\n\nThird point.", Some("T"))
    }

    #[test]
    fn test_publish_all() {
        let thread = thread();
        let mut sink = MemorySink::new();
        let report = publish_thread(&mut sink, &thread, FailurePolicy::StopOnFailure);
        assert!(report.is_complete());
        assert_eq!(report.sink, "memory");
        assert_eq!(report.outcomes.len(), thread.total_chunks);
        assert!(sink.posts()[0].in_reply_to.is_none());
        for pair in sink.posts().windows(2) {
            assert_eq!(pair[1].in_reply_to.as_deref(), Some(pair[0].remote_id.as_str()));
        }
    }

    #[test]
    fn test_publish_stop_on_failure() {
        let thread = thread();
        let mut sink = MemorySink::new().rejecting(&[2]);
        let report = publish_thread(&mut sink, &thread, FailurePolicy::StopOnFailure);
        assert_eq!(report.posted_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.skipped_count(), thread.total_chunks - 2);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_publish_continue_on_failure() {
        let thread = thread();
        let mut sink = MemorySink::new().rejecting(&[2]);
        let report = publish_thread(&mut sink, &thread, FailurePolicy::ContinueOnFailure);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.skipped_count(), 0);
        assert_eq!(report.posted_count(), thread.total_chunks - 1);
        // Chunk 3 replies to chunk 1, the last successful post.
        assert_eq!(sink.posts()[1].in_reply_to.as_deref(), Some("memory-1"));
    }

    #[test]
    fn test_outcome_orders_follow_thread() {
        let thread = thread();
        let report = publish_thread(&mut MemorySink::new(), &thread, FailurePolicy::default());
        let orders: Vec<usize> = report.outcomes.iter().map(|o| o.order).collect();
        let expected: Vec<usize> = (1..=thread.total_chunks).collect();
        assert_eq!(orders, expected);
    }

    #[test]
    fn test_status_serialization() {
        let outcome = ChunkOutcome {
            order: 2,
            status: PostStatus::Posted {
                remote_id: "abc".to_string(),
            },
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"order":2,"status":"posted","remote_id":"abc"}"#);

        let skipped = ChunkOutcome {
            order: 3,
            status: PostStatus::Skipped,
        };
        assert_eq!(
            serde_json::to_string(&skipped).unwrap(),
            r#"{"order":3,"status":"skipped"}"#
        );
        assert_eq!(PostStatus::Skipped.label(), "skipped");
    }
}
