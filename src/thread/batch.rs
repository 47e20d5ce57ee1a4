//! Batch conversion.
//!
//! Converts many documents at once on rayon's thread pool. Each document
//! gets its own result slot, so one bad document never aborts the batch.

use crate::core::{SourceDocument, ThreadResult};
use crate::error::Result;
use crate::thread::ThreadConverter;
use rayon::prelude::*;

/// Batches smaller than this are converted sequentially.
pub const MIN_PARALLEL_BATCH: usize = 8;

/// Outcome of converting one document in a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// Store id of the document, if it has one.
    pub document_id: Option<i64>,
    /// The conversion result.
    pub result: Result<ThreadResult>,
}

impl BatchItem {
    /// Returns true if the conversion succeeded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Converts every document, preserving input order in the output.
///
/// # Examples
///
/// ```
/// use threadify::core::SourceDocument;
/// use threadify::thread::{ThreadConverter, convert_batch};
///
/// let docs = vec![SourceDocument::new("One."), SourceDocument::without_body()];
/// let items = convert_batch(&ThreadConverter::new(), &docs);
/// assert!(items[0].is_ok());
/// assert!(!items[1].is_ok());
/// ```
#[must_use]
pub fn convert_batch(converter: &ThreadConverter, documents: &[SourceDocument]) -> Vec<BatchItem> {
    let convert = |document: &SourceDocument| BatchItem {
        document_id: document.id,
        result: converter.convert_document(document),
    };

    let items: Vec<BatchItem> = if documents.len() < MIN_PARALLEL_BATCH {
        documents.iter().map(convert).collect()
    } else {
        documents.par_iter().map(convert).collect()
    };

    let failed = items.iter().filter(|item| !item.is_ok()).count();
    if failed > 0 {
        tracing::warn!(failed, total = items.len(), "batch conversion had failures");
    }
    items
}
