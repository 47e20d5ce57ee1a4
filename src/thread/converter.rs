//! The thread converter.

use crate::core::{SourceDocument, ThreadResult};
use crate::error::{ConversionError, Result};
use crate::thread::normalize::{extract_hashtags, flatten, normalize};
use crate::thread::segment::segment;
use crate::thread::wrap::{char_len, hard_wrap, split_sentences, truncate_with_ellipsis};
use crate::thread::{OversizePolicy, ThreadConfig};

/// Converts long-form text into a thread of post-sized chunks.
///
/// The converter holds only its configuration, so it is `Send + Sync` and
/// may be shared freely between threads.
///
/// # Examples
///
/// ```
/// use threadify::thread::ThreadConverter;
///
/// let converter = ThreadConverter::new();
/// let thread = converter.convert("Short sentence under limit.", Some("My Title"));
/// assert_eq!(thread.total_chunks, 3);
/// assert_eq!(thread.chunks[0].text, "🧵 My Title");
/// assert_eq!(thread.chunks[1].text, "Short sentence under limit.");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThreadConverter {
    config: ThreadConfig,
}

impl ThreadConverter {
    /// Creates a converter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ThreadConfig::new(),
        }
    }

    /// Creates a converter with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the configuration is invalid.
    pub fn with_config(config: ThreadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ThreadConfig {
        &self.config
    }

    /// Converts text into a thread.
    ///
    /// Always returns at least the call-to-action post. A blank `title`
    /// is treated as absent.
    #[must_use]
    pub fn convert(&self, content: &str, title: Option<&str>) -> ThreadResult {
        let mut posts = Vec::new();

        if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            posts.push(self.title_post(title));
        }

        let sections = segment(&normalize(content));
        tracing::debug!(sections = sections.len(), "segmented content");
        for section in &sections {
            self.pack_section(&section.text, &mut posts);
        }

        posts.push(self.config.cta_post());

        let thread = ThreadResult::from_texts(posts, self.config.words_per_minute);
        for chunk in thread.oversized(self.config.max_len) {
            tracing::warn!(
                order = chunk.order,
                len = chunk.char_len(),
                max_len = self.config.max_len,
                "emitting oversized post"
            );
        }
        tracing::debug!(
            chunks = thread.total_chunks,
            read_minutes = thread.estimated_read_minutes,
            "converted thread"
        );
        thread
    }

    /// Converts raw bytes, which must be valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidInput`] if `content` is not UTF-8.
    pub fn convert_bytes(&self, content: &[u8], title: Option<&str>) -> Result<ThreadResult> {
        let text = std::str::from_utf8(content).map_err(ConversionError::from)?;
        Ok(self.convert(text, title))
    }

    /// Converts a stored document using its own title.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidInput`] if the document has no body.
    pub fn convert_document(&self, document: &SourceDocument) -> Result<ThreadResult> {
        let body = document
            .body
            .as_deref()
            .ok_or_else(|| ConversionError::InvalidInput {
                reason: format!("document {} has no body", document.label()),
            })?;
        Ok(self.convert(body, document.title.as_deref()))
    }

    /// Renders the title post: glyph, title, then its hashtags if they all fit.
    fn title_post(&self, title: &str) -> String {
        let (text, hashtags) = extract_hashtags(&normalize(title));
        let mut head = flatten(&format!("{} {text}", self.config.title_prefix));
        if self.config.oversize == OversizePolicy::HardWrap {
            head = truncate_with_ellipsis(&head, self.config.max_len);
        }

        if hashtags.is_empty() {
            return head;
        }
        let with_tags = flatten(&format!("{head}\n\n{}", hashtags.join(" ")));
        if self.fits(&with_tags) {
            with_tags
        } else {
            head
        }
    }

    /// Packs one section into posts, appending them to `posts`.
    fn pack_section(&self, section: &str, posts: &mut Vec<String>) {
        let text = flatten(section);
        if text.is_empty() {
            return;
        }
        if self.fits(&text) {
            posts.push(text);
            return;
        }

        let mut buffer = String::new();
        for sentence in split_sentences(&text) {
            if buffer.is_empty() {
                buffer = self.open_buffer(sentence, posts);
            } else if char_len(&buffer) + 1 + char_len(sentence) <= self.config.max_len {
                buffer.push(' ');
                buffer.push_str(sentence);
            } else {
                posts.push(std::mem::take(&mut buffer));
                buffer = self.open_buffer(sentence, posts);
            }
        }
        if !buffer.is_empty() {
            posts.push(buffer);
        }
    }

    /// Starts a new packing buffer with `sentence`.
    ///
    /// Under [`OversizePolicy::HardWrap`] an oversized sentence is wrapped:
    /// all but its last piece are emitted and the last piece opens the buffer.
    fn open_buffer(&self, sentence: &str, posts: &mut Vec<String>) -> String {
        if self.fits(sentence) || self.config.oversize == OversizePolicy::Preserve {
            return sentence.to_string();
        }
        let mut pieces = hard_wrap(sentence, self.config.max_len);
        let last = pieces.pop().unwrap_or_default();
        posts.extend(pieces);
        last
    }

    fn fits(&self, text: &str) -> bool {
        char_len(text) <= self.config.max_len
    }
}
