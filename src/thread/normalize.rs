//! Markdown normalization.
//!
//! Reduces markdown-flavoured prose to plain text before segmentation.
//! The pass is lossy: emphasis, inline code and links collapse to their
//! visible text and nothing of the formatting survives.

use regex::{Captures, Regex};
use std::sync::OnceLock;

const CODE_OPEN: char = '\u{E000}';
const CODE_CLOSE: char = '\u{E001}';

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {{
        static $name: OnceLock<Regex> = OnceLock::new();
        #[allow(clippy::expect_used)]
        $name.get_or_init(|| Regex::new($pattern).expect("valid regex"))
    }};
}

fn excess_blank_lines() -> &'static Regex {
    static_regex!(EXCESS_BLANK_LINES, r"\n[ \t]*\n(?:[ \t]*\n)+")
}

fn code_fence() -> &'static Regex {
    static_regex!(CODE_FENCE, r"(?m)^[ \t]*```[^\n]*$")
}

// Labels, bold and italic spans may wrap onto the next line but never
// cross a blank line. Labels may hold one level of nested brackets.
fn link() -> &'static Regex {
    static_regex!(
        LINK,
        r"!?\[((?:[^\[\]\n]|\[[^\[\]\n]*\]|\n[ \t]*[^\s\[\]])*)\]\([^)\n]*\)"
    )
}

fn bold() -> &'static Regex {
    static_regex!(BOLD, r"\*\*((?:[^\n]|\n[ \t]*[^\s])+?)\*\*")
}

// The opening star must touch its word, so a "* item" bullet is left alone.
// A wrapped span cannot continue onto a line that starts with a star.
fn italic() -> &'static Regex {
    static_regex!(ITALIC, r"\*([^\s*](?:[^*\n]|\n[ \t]*[^\s*])*?)\*")
}

fn inline_code() -> &'static Regex {
    static_regex!(INLINE_CODE, r"`([^`\n]+)`")
}

fn hashtag() -> &'static Regex {
    static_regex!(HASHTAG, r"(^|\s)#[\p{L}\p{N}_]+")
}

/// Normalizes raw content into plain text.
///
/// - line endings become `\n`
/// - two or more consecutive blank lines collapse into one
/// - code fences are dropped, `` `code` `` keeps its inner text verbatim
/// - `[label](url)` (and images) keep only the label
/// - `**bold**` and `*italic*` keep their inner text, also when wrapped
///   across a single line break
/// - leftover `**` and backticks are removed
/// - leading and trailing whitespace is trimmed
///
/// # Examples
///
/// ```
/// use threadify::thread::normalize;
///
/// let text = normalize("**Big** news: see [our site](https://example.com).");
/// assert_eq!(text, "Big news: see our site.");
/// ```
#[must_use]
pub fn normalize(content: &str) -> String {
    let text = content.replace("\r\n", "\n").replace('\r', "\n");
    let text = code_fence().replace_all(&text, "");
    let text = excess_blank_lines().replace_all(&text, "\n\n");
    let (text, code_spans) = shield_code(&text);
    let text = link().replace_all(&text, "$1");
    let text = bold().replace_all(&text, "$1");
    let text = italic().replace_all(&text, "$1");

    let text = text.replace("**", "").replace('`', "");
    restore_code(text, &code_spans).trim().to_string()
}

/// Swaps every inline code span for a numbered placeholder, so the
/// emphasis passes never see its contents.
fn shield_code(text: &str) -> (String, Vec<String>) {
    let mut spans = Vec::new();
    let shielded = inline_code().replace_all(text, |caps: &Captures<'_>| {
        spans.push(caps[1].to_string());
        format!("{CODE_OPEN}{}{CODE_CLOSE}", spans.len() - 1)
    });
    (shielded.into_owned(), spans)
}

fn restore_code(mut text: String, spans: &[String]) -> String {
    for (index, span) in spans.iter().enumerate() {
        text = text.replacen(&format!("{CODE_OPEN}{index}{CODE_CLOSE}"), span, 1);
    }
    text
}

/// Splits inline hashtags out of a line of text.
///
/// Returns the text with hashtags removed (whitespace collapsed) and the
/// hashtags in order of appearance, without duplicates.
///
/// # Examples
///
/// ```
/// use threadify::thread::normalize::extract_hashtags;
///
/// let (text, tags) = extract_hashtags("Launch week #SaaS recap #growth");
/// assert_eq!(text, "Launch week recap");
/// assert_eq!(tags, vec!["#SaaS", "#growth"]);
/// ```
#[must_use]
pub fn extract_hashtags(text: &str) -> (String, Vec<String>) {
    let mut tags: Vec<String> = Vec::new();
    for m in hashtag().find_iter(text) {
        let tag = m.as_str().trim_start().to_string();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    let stripped = hashtag().replace_all(text, "$1");
    (flatten(&stripped), tags)
}

/// Collapses all whitespace runs (newlines included) to single spaces and
/// trims the result.
///
/// This is the final formatting applied to every chunk.
#[must_use]
pub fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("**bold** text", "bold text" ; "bold")]
    #[test_case("an *italic* word", "an italic word" ; "italic")]
    #[test_case("run `cargo test` now", "run cargo test now" ; "inline code")]
    #[test_case("see [docs](https://x.io/a_b)", "see docs" ; "link")]
    #[test_case("![logo](logo.png) here", "logo here" ; "image")]
    #[test_case("**bold with *nested* italic**", "bold with nested italic" ; "nested emphasis")]
    #[test_case("stray ** marker", "stray  marker" ; "stray bold marker")]
    #[test_case("`a*b*c`", "a*b*c" ; "inline code keeps stars")]
    #[test_case("call `f(**kw)` or *not*", "call f(**kw) or not" ; "inline code keeps bold markers")]
    #[test_case("[`cfg`](https://x.io) flag", "cfg flag" ; "inline code inside link")]
    #[test_case("read [the full\nguide](https://x.io) today", "read the full\nguide today" ; "wrapped link")]
    #[test_case("see [docs [v2]](https://x.io) here", "see docs [v2] here" ; "nested brackets in link")]
    #[test_case("[a] and [b](https://x.io)", "[a] and b" ; "plain brackets before link")]
    #[test_case("an *italic\nspan* here", "an italic\nspan here" ; "wrapped italic")]
    #[test_case("**bold\n  span** here", "bold\n  span here" ; "wrapped bold")]
    #[test_case("*one\n\ntwo*", "*one\n\ntwo*" ; "blank line ends emphasis")]
    #[test_case("  padded  ", "padded" ; "trim")]
    fn test_normalize_inline(input: &str, expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn test_normalize_collapses_blank_lines() {
        let text = normalize("one\n\n\n\ntwo\n \n\t\nthree");
        assert_eq!(text, "one\n\ntwo\n\nthree");
    }

    #[test]
    fn test_normalize_crlf() {
        assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_normalize_keeps_bullets() {
        let text = normalize("* first item\n* second *item*");
        assert_eq!(text, "* first item\n* second item");
    }

    #[test]
    fn test_normalize_drops_code_fences() {
        let text = normalize("Intro.\n```rust\nlet x = 1;\n```\nOutro.");
        assert!(!text.contains('`'));
        assert!(text.contains("let x = 1;"));
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\n \n"), "");
    }

    #[test]
    fn test_extract_hashtags() {
        let (text, tags) = extract_hashtags("#Growth tips for #SaaS founders #Growth");
        assert_eq!(text, "tips for founders");
        assert_eq!(tags, vec!["#Growth", "#SaaS"]);
    }

    #[test]
    fn test_extract_hashtags_ignores_heading_marker() {
        let (text, tags) = extract_hashtags("# Not a tag");
        assert_eq!(text, "# Not a tag");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_extract_hashtags_unicode() {
        let (text, tags) = extract_hashtags("Résumé #café_2024");
        assert_eq!(text, "Résumé");
        assert_eq!(tags, vec!["#café_2024"]);
    }

    #[test]
    fn test_flatten() {
        assert_eq!(flatten("  a\n\nb\t c  "), "a b c");
        assert_eq!(flatten("\n\n"), "");
    }
}
