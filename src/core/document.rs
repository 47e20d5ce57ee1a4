//! Source documents.
//!
//! A source document is the long-form text a thread is generated from.
//! The body is nullable: the content store may hold a document whose
//! body was never filled in.

use serde::{Deserialize, Serialize};

/// Long-form content awaiting conversion.
///
/// # Examples
///
/// ```
/// use threadify::core::SourceDocument;
///
/// let doc = SourceDocument::new("Launch day copy.").with_title("Launch");
/// assert_eq!(doc.title.as_deref(), Some("Launch"));
/// assert!(doc.id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Unique identifier (assigned by storage layer).
    pub id: Option<i64>,

    /// Optional unique name.
    pub name: Option<String>,

    /// Optional thread title.
    pub title: Option<String>,

    /// Body text, if any.
    pub body: Option<String>,

    /// Unix timestamp when the document was created.
    pub created_at: i64,
}

impl SourceDocument {
    /// Creates a document with the given body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            title: None,
            body: Some(body.into()),
            created_at: current_timestamp(),
        }
    }

    /// Creates a document that has no body.
    #[must_use]
    pub fn without_body() -> Self {
        Self {
            body: None,
            ..Self::new(String::new())
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Body size in bytes (0 when absent).
    #[must_use]
    pub fn size(&self) -> usize {
        self.body.as_ref().map_or(0, String::len)
    }

    /// Display label: name, then id, then "unnamed".
    #[must_use]
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.id
                .map_or_else(|| "unnamed".to_string(), |id| id.to_string())
        })
    }
}

/// Returns the current Unix timestamp in seconds.
#[allow(clippy::cast_possible_wrap)]
fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
