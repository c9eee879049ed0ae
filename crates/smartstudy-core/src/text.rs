//! Sentence splitting and term-frequency indexing.
//!
//! Both summaries and flashcards start from the same normalized sentence
//! sequence; they differ only in how short a fragment may be before it is
//! thrown away.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Sentence;

static TERMINATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("terminator pattern is valid"));

static WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"));

/// Minimum sentence length (in chars) for general-purpose splitting.
pub const GENERAL_MIN_CHARS: usize = 10;

/// Minimum sentence length (in chars) when sentences feed flashcards.
pub const FLASHCARD_MIN_CHARS: usize = 20;

/// Splits raw text into trimmed sentences above a length threshold.
#[derive(Debug, Clone, Copy)]
pub struct SentenceSplitter {
    min_chars: usize,
}

impl SentenceSplitter {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }

    /// Splitter used by the summarizer.
    pub fn general() -> Self {
        Self::new(GENERAL_MIN_CHARS)
    }

    /// Stricter splitter used by the flashcard generator.
    pub fn for_flashcards() -> Self {
        Self::new(FLASHCARD_MIN_CHARS)
    }

    /// Split `text` into sentences.
    ///
    /// Line breaks become spaces, runs of `.`, `!` and `?` end a sentence,
    /// and fragments shorter than the threshold are dropped. Indices are
    /// positions in the filtered sequence. Whitespace-only input yields an
    /// empty vector.
    pub fn split(&self, text: &str) -> Vec<Sentence> {
        let normalized = text.replace("\r\n", " ").replace(['\n', '\r'], " ");

        TERMINATORS
            .split(&normalized)
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty() && fragment.chars().count() >= self.min_chars)
            .enumerate()
            .map(|(index, fragment)| Sentence {
                index,
                text: fragment.to_string(),
            })
            .collect()
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::general()
    }
}

/// Word → occurrence count over one text.
///
/// Only alphabetic words longer than three characters are counted, case
/// folded, without stemming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequencyIndex {
    counts: HashMap<String, usize>,
}

impl TermFrequencyIndex {
    pub fn build(text: &str) -> Self {
        let mut counts = HashMap::new();
        for token in WORDS.find_iter(text) {
            if let Some(term) = normalize_term(token.as_str()) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Count for an already-normalized term, or 0.
    pub fn count(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Count for a raw word as it appears in a sentence.
    ///
    /// Surrounding punctuation is stripped and case is folded before lookup.
    pub fn count_word(&self, word: &str) -> usize {
        let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric());
        normalize_term(trimmed)
            .map(|term| self.count(&term))
            .unwrap_or(0)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

fn normalize_term(token: &str) -> Option<String> {
    if token.chars().count() > 3 && token.chars().all(char::is_alphabetic) {
        Some(token.to_lowercase())
    } else {
        None
    }
}

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
