//! Flashcard extraction.
//!
//! Each sentence is offered to an ordered list of rules; the first rule that
//! produces a card wins and the sentence contributes nothing else. When no
//! sentence yields a card the text is cut into two "key information" halves.

use serde::{Deserialize, Serialize};

use crate::model::{Flashcard, Sentence};
use crate::text::{word_count, SentenceSplitter};

/// Default maximum number of cards per call.
pub const DEFAULT_FLASHCARD_CAP: usize = 6;

/// Inputs shorter than this (in chars, after trimming) yield no cards.
pub const MIN_CONTENT_CHARS: usize = 50;

const MIN_SENTENCE_WORDS: usize = 5;
const MAX_SUBJECT_CHARS: usize = 50;
const MIN_ANSWER_CHARS: usize = 10;
const PREVIEW_CHARS: usize = 50;
const FILL_IN_MIN_WORDS: usize = 10;
const FILL_IN_MIN_TERM_CHARS: usize = 6;
const BLANK: &str = "______";

const COPULAS: [&str; 4] = [" is ", " are ", " means ", " refers to "];
const PROCESS_WORDS: [&str; 4] = ["process", "steps", "method", "procedure"];

/// Card-producing rules in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashcardRule {
    Definition,
    Process,
    FillInBlank,
    Comprehension,
}

impl FlashcardRule {
    /// Evaluation order; the first match wins.
    pub const PRIORITY: [FlashcardRule; 4] = [
        FlashcardRule::Definition,
        FlashcardRule::Process,
        FlashcardRule::FillInBlank,
        FlashcardRule::Comprehension,
    ];

    /// Try to build a card from one sentence.
    pub fn apply(&self, sentence: &str) -> Option<Flashcard> {
        match self {
            FlashcardRule::Definition => definition_card(sentence),
            FlashcardRule::Process => process_card(sentence),
            FlashcardRule::FillInBlank => fill_in_blank_card(sentence),
            FlashcardRule::Comprehension => Some(Flashcard::new(
                "Explain the concept described in this statement:",
                with_period(sentence),
            )),
        }
    }
}

fn definition_card(sentence: &str) -> Option<Flashcard> {
    let (pos, marker) = COPULAS
        .iter()
        .filter_map(|marker| sentence.find(marker).map(|pos| (pos, *marker)))
        .min_by_key(|(pos, _)| *pos)?;

    let subject = sentence[..pos].trim();
    let answer = sentence[pos + marker.len()..].trim();

    if subject.is_empty()
        || subject.chars().count() > MAX_SUBJECT_CHARS
        || answer.chars().count() <= MIN_ANSWER_CHARS
    {
        tracing::trace!(subject, "definition split rejected");
        return None;
    }

    Some(Flashcard::new(
        format!("What is {subject}?"),
        with_period(answer),
    ))
}

fn process_card(sentence: &str) -> Option<Flashcard> {
    let lower = sentence.to_lowercase();
    if !PROCESS_WORDS.iter().any(|w| lower.contains(w)) {
        return None;
    }
    let preview: String = sentence.chars().take(PREVIEW_CHARS).collect();
    Some(Flashcard::new(
        format!("Describe the process mentioned in: {preview}..."),
        with_period(sentence),
    ))
}

fn fill_in_blank_card(sentence: &str) -> Option<Flashcard> {
    if word_count(sentence) <= FILL_IN_MIN_WORDS {
        return None;
    }
    let term = sentence.split_whitespace().find(|w| {
        w.chars().count() > FILL_IN_MIN_TERM_CHARS && w.chars().all(char::is_alphabetic)
    })?;
    Some(Flashcard::new(
        format!("Fill in the blank: {}", blank_first(sentence, term)),
        term,
    ))
}

/// Replace the first whole-word occurrence of `term` with a blank.
fn blank_first(sentence: &str, term: &str) -> String {
    let is_boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric());
    for (pos, _) in sentence.match_indices(term) {
        let end = pos + term.len();
        if is_boundary(sentence[..pos].chars().next_back())
            && is_boundary(sentence[end..].chars().next())
        {
            return format!("{}{BLANK}{}", &sentence[..pos], &sentence[end..]);
        }
    }
    sentence.replacen(term, BLANK, 1)
}

fn with_period(text: &str) -> String {
    if text.ends_with(['.', '!', '?']) {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

/// Extracts flashcards from study text.
#[derive(Debug, Clone, Copy)]
pub struct FlashcardGenerator {
    splitter: SentenceSplitter,
    cap: usize,
}

impl FlashcardGenerator {
    pub fn new(cap: usize) -> Self {
        Self {
            splitter: SentenceSplitter::for_flashcards(),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Card for a single sentence, with the rule that produced it.
    pub fn card_for(sentence: &Sentence) -> Option<(FlashcardRule, Flashcard)> {
        if word_count(&sentence.text) < MIN_SENTENCE_WORDS {
            return None;
        }
        FlashcardRule::PRIORITY
            .iter()
            .find_map(|rule| rule.apply(&sentence.text).map(|card| (*rule, card)))
    }

    /// Generate at most `cap` cards, in source order.
    pub fn generate(&self, text: &str) -> Vec<Flashcard> {
        if self.cap == 0 || text.trim().chars().count() < MIN_CONTENT_CHARS {
            return Vec::new();
        }

        let mut cards = Vec::new();
        for sentence in self.splitter.split(text) {
            if cards.len() >= self.cap {
                break;
            }
            if let Some((rule, card)) = Self::card_for(&sentence) {
                tracing::trace!(index = sentence.index, ?rule, "flashcard extracted");
                cards.push(card);
            }
        }

        if cards.is_empty() {
            tracing::debug!("no sentence produced a card, splitting text into halves");
            cards = key_information_cards(text);
        }

        cards.truncate(self.cap);
        cards
    }
}

impl Default for FlashcardGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FLASHCARD_CAP)
    }
}

fn key_information_cards(text: &str) -> Vec<Flashcard> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let (first, second) = words.split_at(words.len() / 2);
    [first, second]
        .into_iter()
        .filter(|half| !half.is_empty())
        .enumerate()
        .map(|(i, half)| {
            Flashcard::new(format!("Key Information (Part {})", i + 1), half.join(" "))
        })
        .collect()
}
