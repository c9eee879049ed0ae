//! Extractive summarization.
//!
//! Sentences are scored under a style-dependent policy, the best ones are
//! kept, and the survivors are emitted in their original order. Nothing is
//! paraphrased: every summary sentence is verbatim source text.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{Sentence, SummaryLength, SummaryStyle};
use crate::text::{word_count, SentenceSplitter, TermFrequencyIndex};

/// Returned when there is nothing to summarize.
pub const EMPTY_SUMMARY: &str = "No text provided to summarize.";

/// A sentence paired with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub score: f64,
    pub sentence: Sentence,
}

/// How sentences are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// Mean term frequency of the sentence's words.
    Frequency,
    /// Domain keyword hits plus `word_count / 20`.
    Keyword(&'static [&'static str]),
}

impl ScoringPolicy {
    pub fn for_style(style: SummaryStyle) -> Self {
        match style.keywords() {
            Some(keywords) => ScoringPolicy::Keyword(keywords),
            None => ScoringPolicy::Frequency,
        }
    }

    /// Score every sentence of `text`.
    pub fn score(&self, text: &str, sentences: &[Sentence]) -> Vec<ScoredSentence> {
        match self {
            ScoringPolicy::Frequency => {
                let index = TermFrequencyIndex::build(text);
                sentences
                    .iter()
                    .map(|sentence| ScoredSentence {
                        score: frequency_score(&index, &sentence.text),
                        sentence: sentence.clone(),
                    })
                    .collect()
            }
            ScoringPolicy::Keyword(keywords) => sentences
                .iter()
                .map(|sentence| ScoredSentence {
                    score: keyword_score(keywords, &sentence.text),
                    sentence: sentence.clone(),
                })
                .collect(),
        }
    }
}

fn frequency_score(index: &TermFrequencyIndex, sentence: &str) -> f64 {
    let words = word_count(sentence);
    if words == 0 {
        return 0.0;
    }
    let total: usize = sentence
        .split_whitespace()
        .map(|word| index.count_word(word))
        .sum();
    total as f64 / words as f64
}

fn keyword_score(keywords: &[&str], sentence: &str) -> f64 {
    let lower = sentence.to_lowercase();
    let hits = keywords.iter().filter(|k| lower.contains(*k)).count();
    hits as f64 + word_count(sentence) as f64 / 20.0
}

/// Highest score first; equal scores keep the earlier sentence first.
fn by_rank(a: &ScoredSentence, b: &ScoredSentence) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.sentence.index.cmp(&b.sentence.index))
}

/// Builds extractive summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Summarizer {
    splitter: SentenceSplitter,
}

impl Summarizer {
    pub fn new() -> Self {
        Self {
            splitter: SentenceSplitter::general(),
        }
    }

    /// Pick the sentences that make up the summary, in source order.
    pub fn select(
        &self,
        text: &str,
        sentences: &[Sentence],
        length: SummaryLength,
        style: SummaryStyle,
    ) -> Vec<ScoredSentence> {
        let target = length.target_sentences(sentences.len());
        let mut scored = ScoringPolicy::for_style(style).score(text, sentences);
        scored.sort_by(by_rank);
        scored.truncate(target);
        scored.sort_by_key(|s| s.sentence.index);
        scored
    }

    /// Summarize `text`.
    ///
    /// Empty input yields [`EMPTY_SUMMARY`]; input with at most one usable
    /// sentence is returned trimmed and otherwise unchanged.
    pub fn summarize(&self, text: &str, length: SummaryLength, style: SummaryStyle) -> String {
        if text.trim().is_empty() {
            return EMPTY_SUMMARY.to_string();
        }

        let sentences = self.splitter.split(text);
        if sentences.len() <= 1 {
            return text.trim().to_string();
        }

        let selected = self.select(text, &sentences, length, style);
        tracing::debug!(
            sentences = sentences.len(),
            selected = selected.len(),
            %length,
            %style,
            "summary sentences selected"
        );

        let mut summary = selected
            .iter()
            .map(|s| s.sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(". ");
        if !summary.ends_with('.') {
            summary.push('.');
        }
        summary
    }
}
