//! Thread representation.

use crate::core::Chunk;
use serde::{Deserialize, Serialize};

/// The ordered output of one conversion.
///
/// Created fresh on every call. Chunk orders form the contiguous sequence
/// `1..=total_chunks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadResult {
    /// Chunks in publishing order.
    pub chunks: Vec<Chunk>,

    /// Number of chunks, always equal to `chunks.len()`.
    pub total_chunks: usize,

    /// Estimated reading time in whole minutes, at least 1.
    pub estimated_read_minutes: usize,
}

impl ThreadResult {
    /// Builds a result from chunk texts, numbering them from 1.
    ///
    /// `words_per_minute` must be non-zero.
    #[must_use]
    pub fn from_texts(texts: Vec<String>, words_per_minute: usize) -> Self {
        let chunks: Vec<Chunk> = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk::new(i + 1, text))
            .collect();
        let words = chunks.iter().map(Chunk::word_count).sum();

        Self {
            total_chunks: chunks.len(),
            estimated_read_minutes: read_minutes(words, words_per_minute),
            chunks,
        }
    }

    /// Total word count across all chunks.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.chunks.iter().map(Chunk::word_count).sum()
    }

    /// Chunks whose text exceeds `max_len` characters.
    ///
    /// Only an unsplittable sentence can end up here, and only when the
    /// converter preserves oversized sentences.
    #[must_use]
    pub fn oversized(&self, max_len: usize) -> Vec<&Chunk> {
        self.chunks.iter().filter(|c| !c.fits(max_len)).collect()
    }

    /// Checks that orders run 1..=N without gaps and the count matches.
    #[must_use]
    pub fn is_well_ordered(&self) -> bool {
        self.total_chunks == self.chunks.len()
            && self
                .chunks
                .iter()
                .enumerate()
                .all(|(i, c)| c.order == i + 1)
    }
}

/// Reading time in minutes: `ceil(words / words_per_minute)`, at least 1.
#[must_use]
pub fn read_minutes(words: usize, words_per_minute: usize) -> usize {
    words.div_ceil(words_per_minute.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 1 ; "empty floors at one")]
    #[test_case(1, 1 ; "single word")]
    #[test_case(200, 1 ; "exactly one minute")]
    #[test_case(201, 2 ; "rounds up")]
    #[test_case(1000, 5 ; "five minutes")]
    fn test_read_minutes(words: usize, expected: usize) {
        assert_eq!(read_minutes(words, 200), expected);
    }

    #[test]
    fn test_from_texts_numbers_from_one() {
        let result = ThreadResult::from_texts(
            vec!["one two".to_string(), "three".to_string()],
            200,
        );
        assert_eq!(result.total_chunks, 2);
        assert_eq!(result.chunks[0].order, 1);
        assert_eq!(result.chunks[1].order, 2);
        assert_eq!(result.word_count(), 3);
        assert_eq!(result.estimated_read_minutes, 1);
        assert!(result.is_well_ordered());
    }

    #[test]
    fn test_oversized() {
        let result = ThreadResult::from_texts(
            vec!["short".to_string(), "x".repeat(20)],
            200,
        );
        let over = result.oversized(10);
        assert_eq!(over.len(), 1);
        assert_eq!(over[0].order, 2);
    }

    #[test]
    fn test_is_well_ordered_detects_gap() {
        let mut result = ThreadResult::from_texts(vec!["a".to_string(), "b".to_string()], 200);
        result.chunks[1].order = 3;
        assert!(!result.is_well_ordered());
    }
}
