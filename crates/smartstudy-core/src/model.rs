//! Core data model types for smartstudy.
//!
//! These are the value objects the engine hands back to its callers, and
//! the option enums callers pass in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trimmed, non-empty sentence and its position in the filtered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// 0-based position among the sentences that survived filtering.
    pub index: usize,
    /// Sentence text without its terminating punctuation.
    pub text: String,
}

/// A question/answer pair extracted from source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// The prompt side (a question or directive).
    pub front: String,
    /// The answer side.
    pub back: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// 0-based index into `options`.
    pub correct: usize,
    pub explanation: String,
}

impl QuizQuestion {
    /// Returns `true` if `correct` points at an existing option.
    pub fn is_valid(&self) -> bool {
        self.correct < self.options.len()
    }
}

/// A bounded set of questions for one topic and difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSet {
    /// The topic exactly as the caller supplied it.
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuizQuestion>,
}

/// Engine entry points, used for cache keys, telemetry and error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Summarize,
    Flashcards,
    Answer,
}

impl Operation {
    /// Stable identifier mixed into cache fingerprints.
    pub fn id(&self) -> &'static str {
        match self {
            Operation::Summarize => "summarize",
            Operation::Flashcards => "flashcards",
            Operation::Answer => "answer",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// How long a summary should be relative to its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    /// Number of sentences to select out of `sentence_count`.
    ///
    /// Never zero and never more than `sentence_count` when that is non-zero.
    pub fn target_sentences(&self, sentence_count: usize) -> usize {
        let target = match self {
            SummaryLength::Short => (sentence_count / 4).max(1),
            SummaryLength::Medium => (sentence_count / 3).max(1),
            SummaryLength::Long => (sentence_count / 2).max(2),
        };
        target.min(sentence_count.max(1))
    }

    /// Lenient parse used at the engine boundary.
    pub fn parse_or_default(s: &str) -> Self {
        parse_or_default(s, "length")
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLength::Short => write!(f, "short"),
            SummaryLength::Medium => write!(f, "medium"),
            SummaryLength::Long => write!(f, "long"),
        }
    }
}

impl FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(SummaryLength::Short),
            "medium" => Ok(SummaryLength::Medium),
            "long" => Ok(SummaryLength::Long),
            other => Err(format!("unknown summary length: {other}")),
        }
    }
}

/// Scoring policy applied when picking summary sentences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    #[default]
    General,
    Academic,
    Technical,
    Bullet,
    Simple,
}

impl SummaryStyle {
    /// Domain keywords that earn a bonus under this style, if any.
    pub fn keywords(&self) -> Option<&'static [&'static str]> {
        match self {
            SummaryStyle::Academic => Some(&[
                "research",
                "study",
                "analysis",
                "theory",
                "methodology",
                "findings",
                "conclusion",
            ]),
            SummaryStyle::Technical => Some(&[
                "system",
                "process",
                "method",
                "function",
                "algorithm",
                "data",
                "implement",
            ]),
            SummaryStyle::General | SummaryStyle::Bullet | SummaryStyle::Simple => None,
        }
    }

    /// Lenient parse used at the engine boundary.
    pub fn parse_or_default(s: &str) -> Self {
        parse_or_default(s, "style")
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryStyle::General => write!(f, "general"),
            SummaryStyle::Academic => write!(f, "academic"),
            SummaryStyle::Technical => write!(f, "technical"),
            SummaryStyle::Bullet => write!(f, "bullet"),
            SummaryStyle::Simple => write!(f, "simple"),
        }
    }
}

impl FromStr for SummaryStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(SummaryStyle::General),
            "academic" => Ok(SummaryStyle::Academic),
            "technical" => Ok(SummaryStyle::Technical),
            "bullet" => Ok(SummaryStyle::Bullet),
            "simple" => Ok(SummaryStyle::Simple),
            other => Err(format!("unknown summary style: {other}")),
        }
    }
}

/// Quiz difficulty.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
}

impl Difficulty {
    /// Lenient parse used at the engine boundary.
    pub fn parse_or_default(s: &str) -> Self {
        parse_or_default(s, "difficulty")
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

fn parse_or_default<T>(s: &str, what: &str) -> T
where
    T: FromStr<Err = String> + Default + fmt::Display,
{
    s.parse().unwrap_or_else(|e: String| {
        let fallback = T::default();
        tracing::debug!("{e}; using default {what} '{fallback}'");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_display_and_parse() {
        assert_eq!(SummaryLength::Short.to_string(), "short");
        assert_eq!("LONG".parse::<SummaryLength>().unwrap(), SummaryLength::Long);
        assert_eq!(
            " technical ".parse::<SummaryStyle>().unwrap(),
            SummaryStyle::Technical
        );
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("huge".parse::<SummaryLength>().is_err());
        assert!("poetic".parse::<SummaryStyle>().is_err());
        assert!("hard".parse::<Difficulty>().is_err());
    }

    #[test]
    fn unknown_options_fall_back_to_defaults() {
        assert_eq!(SummaryLength::parse_or_default("huge"), SummaryLength::Medium);
        assert_eq!(SummaryStyle::parse_or_default(""), SummaryStyle::General);
        assert_eq!(Difficulty::parse_or_default("hard"), Difficulty::Medium);
        assert_eq!(SummaryStyle::parse_or_default("Bullet"), SummaryStyle::Bullet);
    }

    #[test]
    fn target_sentences_bounds() {
        assert_eq!(SummaryLength::Short.target_sentences(3), 1);
        assert_eq!(SummaryLength::Short.target_sentences(12), 3);
        assert_eq!(SummaryLength::Medium.target_sentences(2), 1);
        assert_eq!(SummaryLength::Medium.target_sentences(9), 3);
        assert_eq!(SummaryLength::Long.target_sentences(2), 2);
        assert_eq!(SummaryLength::Long.target_sentences(10), 5);
        // Never more sentences than exist.
        assert_eq!(SummaryLength::Long.target_sentences(1), 1);
    }

    #[test]
    fn style_keywords() {
        assert!(SummaryStyle::General.keywords().is_none());
        assert!(SummaryStyle::Academic
            .keywords()
            .unwrap()
            .contains(&"research"));
        assert!(SummaryStyle::Technical
            .keywords()
            .unwrap()
            .contains(&"algorithm"));
    }

    #[test]
    fn difficulty_orders_easy_first() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        let mut groups = std::collections::BTreeMap::new();
        groups.insert(("math".to_string(), Difficulty::Medium), 2);
        groups.insert(("math".to_string(), Difficulty::Easy), 1);
        assert_eq!(groups.values().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn quiz_question_validity() {
        let mut q = QuizQuestion {
            question: "2 + 2?".into(),
            options: vec!["3".into(), "4".into()],
            correct: 1,
            explanation: "Arithmetic.".into(),
        };
        assert!(q.is_valid());
        q.correct = 2;
        assert!(!q.is_valid());
    }

    #[test]
    fn quiz_set_serializes_lowercase_difficulty() {
        let set = QuizSet {
            topic: "Science".into(),
            difficulty: Difficulty::Easy,
            questions: vec![],
        };
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains("\"difficulty\":\"easy\""));
        let back: QuizSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
