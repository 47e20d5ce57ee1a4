//! Section segmentation.
//!
//! Splits normalized text into ordered sections with a line-oriented state
//! machine. A section starts at every line that opens with a heading or
//! bullet marker, or that is a standalone capitalized sentence. The line
//! that opens a section stays with it. When that finds no structure, the
//! text is split into blank-line separated paragraphs instead.

use serde::Serialize;

/// What opened a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Boundary {
    /// A line starting with `#`.
    Heading,
    /// A line starting with `-`, `*` or `•`.
    Bullet,
    /// A capitalized line ending in `.`, `!` or `?`.
    Sentence,
    /// Text before the first structural boundary.
    Paragraph,
    /// A blank-line separated paragraph, from the fallback pass.
    ParagraphFallback,
}

/// A pre-chunking grouping of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// What opened this section.
    pub boundary: Boundary,
    /// Section text, trimmed, internal newlines preserved.
    pub text: String,
}

impl Section {
    fn new(boundary: Boundary, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self {
                boundary,
                text: text.to_string(),
            })
        }
    }
}

/// Segments text into sections, preserving source order.
///
/// # Examples
///
/// ```
/// use threadify::thread::segment::{Boundary, segment};
///
/// let sections = segment("# Heading\n\nParagraph one.\n\nParagraph two.");
/// assert_eq!(sections.len(), 3);
/// assert_eq!(sections[0].boundary, Boundary::Heading);
/// assert_eq!(sections[2].text, "Paragraph two.");
/// ```
#[must_use]
pub fn segment(text: &str) -> Vec<Section> {
    let sections = split_structural(text);
    if sections.len() > 1 {
        return sections;
    }
    split_paragraphs(text)
}

/// Classifies a line that opens a new section.
fn classify(line: &str) -> Option<Boundary> {
    let trimmed = line.trim();
    let first = trimmed.chars().next()?;
    match first {
        '#' => Some(Boundary::Heading),
        '-' | '*' | '•' => Some(Boundary::Bullet),
        c if c.is_uppercase() && trimmed.ends_with(['.', '!', '?']) => Some(Boundary::Sentence),
        _ => None,
    }
}

/// Primary pass: split before every structural line.
fn split_structural(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut boundary = Boundary::Paragraph;
    let mut current = String::new();

    for line in text.lines() {
        if let Some(next) = classify(line) {
            sections.extend(Section::new(boundary, &current));
            boundary = next;
            current.clear();
        } else if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    sections.extend(Section::new(boundary, &current));

    sections
}

/// Fallback pass: split on blank lines.
fn split_paragraphs(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            sections.extend(Section::new(Boundary::ParagraphFallback, &current));
            current.clear();
            continue;
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    sections.extend(Section::new(Boundary::ParagraphFallback, &current));

    sections
}
