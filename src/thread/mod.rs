//! Long-form to thread conversion.
//!
//! Turns free-form prose into an ordered list of post-sized chunks:
//!
//! 1. **Normalize**: strip markdown, collapse blank lines
//! 2. **Segment**: split into heading, bullet, sentence or paragraph sections
//! 3. **Pack**: fit each section into posts, greedily packing sentences
//! 4. **Frame**: prepend an optional title post, append the call-to-action
//!
//! The conversion is pure: identical input always yields identical output.

pub mod batch;
pub mod converter;
pub mod normalize;
pub mod segment;
pub mod wrap;

pub use batch::{BatchItem, convert_batch};
pub use converter::ThreadConverter;
pub use normalize::normalize;
pub use segment::{Boundary, Section, segment};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default per-post character budget.
pub const DEFAULT_MAX_LEN: usize = 280;

/// Default reading speed for the read-time estimate.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Glyph that opens the title post.
pub const THREAD_GLYPH: &str = "🧵";

/// Default call-to-action text.
pub const DEFAULT_CTA_TEXT: &str = "Thanks for reading! If this thread helped, follow for more \
                                    and repost the first post to share it with your network.";

/// Default hashtags appended to the call-to-action.
pub const DEFAULT_CTA_HASHTAGS: [&str; 3] = ["#Marketing", "#ContentStrategy", "#Thread"];

/// What to do with a single sentence longer than the budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OversizePolicy {
    /// Emit the sentence unmodified as an oversized post.
    #[default]
    Preserve,
    /// Wrap the sentence at word (then grapheme) boundaries.
    HardWrap,
}

/// Conversion settings.
///
/// Defaults match the reference behaviour: 280 characters per post,
/// 200 words per minute, oversized sentences preserved.
///
/// # Examples
///
/// ```
/// use threadify::thread::{OversizePolicy, ThreadConfig};
///
/// let config = ThreadConfig::new()
///     .max_len(500)
///     .oversize(OversizePolicy::HardWrap);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadConfig {
    /// Per-post character budget.
    pub max_len: usize,

    /// Reading speed used for the read-time estimate.
    pub words_per_minute: usize,

    /// Glyph placed before the title.
    pub title_prefix: String,

    /// Call-to-action text.
    pub cta_text: String,

    /// Hashtags appended to the call-to-action.
    pub cta_hashtags: Vec<String>,

    /// Handling of sentences longer than `max_len`.
    pub oversize: OversizePolicy,
}

impl Default for ThreadConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            title_prefix: THREAD_GLYPH.to_string(),
            cta_text: DEFAULT_CTA_TEXT.to_string(),
            cta_hashtags: DEFAULT_CTA_HASHTAGS.iter().map(ToString::to_string).collect(),
            oversize: OversizePolicy::Preserve,
        }
    }

    /// Sets the per-post character budget.
    #[must_use]
    pub const fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Sets the reading speed.
    #[must_use]
    pub const fn words_per_minute(mut self, wpm: usize) -> Self {
        self.words_per_minute = wpm;
        self
    }

    /// Sets the oversized-sentence policy.
    #[must_use]
    pub const fn oversize(mut self, policy: OversizePolicy) -> Self {
        self.oversize = policy;
        self
    }

    /// Sets the title glyph.
    #[must_use]
    pub fn title_prefix(mut self, prefix: &str) -> Self {
        self.title_prefix = prefix.to_string();
        self
    }

    /// Sets the call-to-action text and hashtags.
    #[must_use]
    pub fn call_to_action(mut self, text: &str, hashtags: &[&str]) -> Self {
        self.cta_text = text.to_string();
        self.cta_hashtags = hashtags.iter().map(ToString::to_string).collect();
        self
    }

    /// Renders the call-to-action post.
    #[must_use]
    pub fn cta_post(&self) -> String {
        normalize::flatten(&format!(
            "{}\n\n{}",
            self.cta_text,
            self.cta_hashtags.join(" ")
        ))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the budget or reading speed is zero, or
    /// if the call-to-action or title glyph does not fit the budget.
    pub fn validate(&self) -> Result<()> {
        if self.max_len == 0 {
            return Err(config_error("max_len must be > 0"));
        }
        if self.words_per_minute == 0 {
            return Err(config_error("words_per_minute must be > 0"));
        }
        let cta_len = wrap::char_len(&self.cta_post());
        if cta_len > self.max_len {
            return Err(config_error(&format!(
                "call-to-action is {cta_len} chars, exceeds max_len {}",
                self.max_len
            )));
        }
        if wrap::char_len(&self.title_prefix) >= self.max_len {
            return Err(config_error("title prefix leaves no room for a title"));
        }
        Ok(())
    }
}

fn config_error(message: &str) -> Error {
    Error::Config {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ThreadConfig::new();
        assert_eq!(config.max_len, 280);
        assert_eq!(config.words_per_minute, 200);
        assert_eq!(config.title_prefix, "🧵");
        assert_eq!(config.oversize, OversizePolicy::Preserve);
        assert_eq!(config, ThreadConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cta_post_is_single_line() {
        let cta = ThreadConfig::new().cta_post();
        assert!(!cta.contains('\n'));
        assert!(cta.starts_with("Thanks for reading!"));
        assert!(cta.ends_with("#Marketing #ContentStrategy #Thread"));
        assert!(wrap::char_len(&cta) <= DEFAULT_MAX_LEN);
    }

    #[test]
    fn test_config_builder() {
        let config = ThreadConfig::new()
            .max_len(500)
            .words_per_minute(250)
            .oversize(OversizePolicy::HardWrap)
            .title_prefix(">>")
            .call_to_action("Follow us.", &["#a"]);
        assert_eq!(config.max_len, 500);
        assert_eq!(config.words_per_minute, 250);
        assert_eq!(config.oversize, OversizePolicy::HardWrap);
        assert_eq!(config.cta_post(), "Follow us. #a");
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let err = ThreadConfig::new().max_len(0).validate().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_wpm() {
        assert!(ThreadConfig::new().words_per_minute(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_cta_over_budget() {
        let err = ThreadConfig::new().max_len(40).validate().unwrap_err();
        assert!(err.to_string().contains("call-to-action"));
    }

    #[test]
    fn test_validate_rejects_oversized_prefix() {
        let config = ThreadConfig::new()
            .max_len(12)
            .call_to_action("Follow.", &[])
            .title_prefix("############");
        assert!(config.validate().is_err());
    }
}
