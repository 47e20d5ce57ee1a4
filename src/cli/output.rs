//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{SourceDocument, ThreadResult};
use crate::error::Error;
use crate::publish::{PostStatus, PublishReport};
use crate::storage::StoreStats;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a status response.
#[must_use]
pub fn format_status(stats: &StoreStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str("threadify status\n");
            output.push_str("================\n\n");
            let _ = writeln!(output, "  Documents:  {}", stats.document_count);
            let _ = writeln!(output, "  Threads:    {}", stats.thread_count);
            let _ = writeln!(output, "  Chunks:     {}", stats.chunk_count);
            let _ = writeln!(output, "  Outcomes:   {}", stats.outcome_count);
            let _ = writeln!(output, "  Schema:     v{}", stats.schema_version);
            if let Some(size) = stats.db_size {
                let _ = writeln!(output, "  DB size:    {size} bytes");
            }
            output
        }
        OutputFormat::Json => format_json(stats),
    }
}

/// Formats a thread, flagging posts over `max_len`.
#[must_use]
pub fn format_thread(thread: &ThreadResult, max_len: usize, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(
                output,
                "Thread: {} posts, ~{} min read",
                thread.total_chunks, thread.estimated_read_minutes
            );
            output.push_str(&"-".repeat(70));
            output.push('\n');
            for chunk in &thread.chunks {
                let flag = if chunk.fits(max_len) { "" } else { " OVERSIZED" };
                let _ = writeln!(
                    output,
                    "[{}/{}] ({} chars){flag}",
                    chunk.order,
                    thread.total_chunks,
                    chunk.char_len()
                );
                let _ = writeln!(output, "{}\n", chunk.text);
            }
            output
        }
        OutputFormat::Json => format_json(thread),
    }
}

/// Formats a document list.
#[must_use]
pub fn format_document_list(documents: &[SourceDocument], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if documents.is_empty() {
                return "No documents found.\n".to_string();
            }
            let mut output = String::new();
            output.push_str("Documents:\n");
            let _ = writeln!(output, "{:<6} {:<20} {:<10} Title", "ID", "Name", "Size");
            output.push_str(&"-".repeat(70));
            output.push('\n');
            for doc in documents {
                let id = doc.id.map_or_else(|| "-".to_string(), |i| i.to_string());
                let size = doc
                    .body
                    .as_ref()
                    .map_or_else(|| "(empty)".to_string(), |b| format!("{} B", b.len()));
                let _ = writeln!(
                    output,
                    "{:<6} {:<20} {:<10} {}",
                    id,
                    truncate(doc.name.as_deref().unwrap_or("-"), 20),
                    size,
                    truncate(doc.title.as_deref().unwrap_or("-"), 30)
                );
            }
            output
        }
        OutputFormat::Json => format_json(&documents),
    }
}

/// Formats a single document, optionally with its thread.
#[must_use]
pub fn format_document(
    document: &SourceDocument,
    thread: Option<&ThreadResult>,
    max_len: usize,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Document: {}", document.label());
            let _ = writeln!(output, "  ID:     {}", document.id.unwrap_or(0));
            if let Some(ref title) = document.title {
                let _ = writeln!(output, "  Title:  {title}");
            }
            let _ = writeln!(output, "  Size:   {} bytes", document.size());
            match &document.body {
                Some(body) => {
                    let preview = truncate(&body.replace('\n', "\\n"), 60);
                    let _ = writeln!(output, "  Body:   {preview}");
                }
                None => output.push_str("  Body:   (none)\n"),
            }
            if let Some(thread) = thread {
                output.push('\n');
                output.push_str(&format_thread(thread, max_len, OutputFormat::Text));
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct DocumentWithThread<'a> {
                document: &'a SourceDocument,
                thread: Option<&'a ThreadResult>,
            }
            format_json(&DocumentWithThread { document, thread })
        }
    }
}

/// Formats a publish report.
#[must_use]
pub fn format_publish_report(report: &PublishReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(
                output,
                "Published via {}: {} posted, {} failed, {} skipped",
                report.sink,
                report.posted_count(),
                report.failed_count(),
                report.skipped_count()
            );
            for outcome in &report.outcomes {
                let detail = match &outcome.status {
                    PostStatus::Posted { remote_id } => format!("posted  {remote_id}"),
                    PostStatus::Failed { reason } => format!("failed  {reason}"),
                    PostStatus::Skipped => "skipped".to_string(),
                };
                let _ = writeln!(output, "  [{}] {detail}", outcome.order);
            }
            output
        }
        OutputFormat::Json => format_json(report),
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }
            format_json(&ErrorOutput {
                error: error.to_string(),
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Truncates a string to `max_chars` characters with ellipsis.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
