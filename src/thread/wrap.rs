//! Sentence splitting and length-bounded wrapping.
//!
//! All lengths here are counted in characters, the unit of the per-post
//! budget.

use unicode_segmentation::UnicodeSegmentation;

/// Length of `text` in characters.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Splits flattened text into sentences.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace; the
/// punctuation stays with the sentence and the whitespace is dropped.
/// Text without such a break is returned as a single sentence.
///
/// # Examples
///
/// ```
/// use threadify::thread::wrap::split_sentences;
///
/// let sentences = split_sentences("One. Two! Three? Four");
/// assert_eq!(sentences, vec!["One.", "Two!", "Three?", "Four"]);
/// ```
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if chars.peek().is_some_and(|&(_, next)| next.is_whitespace()) {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            while chars.peek().is_some_and(|&(_, next)| next.is_whitespace()) {
                chars.next();
            }
            start = chars.peek().map_or(text.len(), |&(j, _)| j);
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// Wraps text into pieces of at most `max_len` characters.
///
/// Breaks at whitespace where possible; a word longer than `max_len` is
/// cut at grapheme cluster boundaries. Pieces are whitespace-flattened.
///
/// # Examples
///
/// ```
/// use threadify::thread::wrap::hard_wrap;
///
/// let pieces = hard_wrap("aaa bbb ccc", 7);
/// assert_eq!(pieces, vec!["aaa bbb", "ccc"]);
/// ```
#[must_use]
pub fn hard_wrap(text: &str, max_len: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = char_len(word);

        if word_len > max_len {
            if !line.is_empty() {
                pieces.push(std::mem::take(&mut line));
            }
            let mut parts = split_graphemes(word, max_len);
            // The tail of a cut word can still share a piece with what follows.
            line = parts.pop().unwrap_or_default();
            line_len = char_len(&line);
            pieces.extend(parts);
            continue;
        }

        if line.is_empty() {
            line.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= max_len {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
        } else {
            pieces.push(std::mem::replace(&mut line, word.to_string()));
            line_len = word_len;
        }
    }

    if !line.is_empty() {
        pieces.push(line);
    }
    pieces
}

/// Cuts a word into runs of at most `max_len` characters without splitting
/// a grapheme cluster.
fn split_graphemes(word: &str, max_len: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for grapheme in word.graphemes(true) {
        let len = char_len(grapheme);
        if current_len + len > max_len && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(grapheme);
        current_len += len;
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Shortens text to at most `max_len` characters, ending with `…` when cut.
///
/// # Examples
///
/// ```
/// use threadify::thread::wrap::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("short", 10), "short");
/// assert_eq!(truncate_with_ellipsis("a long title", 7), "a long…");
/// ```
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if char_len(text) <= max_len {
        return text.to_string();
    }

    let budget = max_len.saturating_sub(1);
    let mut out = String::new();
    let mut len = 0;
    for grapheme in text.graphemes(true) {
        let g_len = char_len(grapheme);
        if len + g_len > budget {
            break;
        }
        out.push_str(grapheme);
        len += g_len;
    }

    let mut out = out.trim_end().to_string();
    out.push('…');
    out
}
