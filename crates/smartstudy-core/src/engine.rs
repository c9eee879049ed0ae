//! The study engine facade.
//!
//! Owns the read-only content tables, the response cache and the shared
//! randomness source, and exposes the synchronous call surface used by
//! presentation layers. Option arguments are plain strings and are coerced
//! to their defaults when unrecognized.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cache::{CacheStats, LatencySample, ResponseCache};
use crate::catalog;
use crate::config::EngineConfig;
use crate::content::{load_knowledge_base, load_quiz_bank};
use crate::error::EngineError;
use crate::flashcards::FlashcardGenerator;
use crate::grading::{grade_quiz, QuizResult};
use crate::knowledge::{KnowledgeBase, KnowledgeResponder};
use crate::model::{Difficulty, Flashcard, Operation, QuizSet, SummaryLength, SummaryStyle};
use crate::quiz::QuizBank;
use crate::summarizer::Summarizer;

/// Offline text-analysis engine.
///
/// All methods take `&self`; the engine can be shared across threads behind
/// an `Arc`.
pub struct StudyEngine {
    config: EngineConfig,
    summarizer: Summarizer,
    flashcards: FlashcardGenerator,
    responder: KnowledgeResponder,
    quiz_bank: Arc<QuizBank>,
    cache: ResponseCache,
    rng: Mutex<StdRng>,
}

impl StudyEngine {
    pub fn new(config: EngineConfig, knowledge: KnowledgeBase, quiz_bank: QuizBank) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            summarizer: Summarizer::new(),
            flashcards: FlashcardGenerator::new(config.flashcard_cap),
            responder: KnowledgeResponder::new(Arc::new(knowledge)),
            quiz_bank: Arc::new(quiz_bank),
            cache: ResponseCache::new(config.cache_capacity, config.latency_log_capacity),
            rng: Mutex::new(rng),
            config,
        }
    }

    /// Build an engine from `config`, loading any content files it names.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let knowledge = match &config.knowledge_file {
            Some(path) => load_knowledge_base(path)?,
            None => KnowledgeBase::builtin(),
        };
        let quiz_bank = match &config.quiz_bank_file {
            Some(path) => load_quiz_bank(path)?,
            None => QuizBank::builtin(),
        };
        tracing::info!(
            knowledge_entries = knowledge.len(),
            quiz_questions = quiz_bank.len(),
            seeded = config.seed.is_some(),
            "study engine ready"
        );
        Ok(Self::new(config, knowledge, quiz_bank))
    }

    /// Built-in content and default settings.
    pub fn builtin() -> Self {
        Self::new(
            EngineConfig::default(),
            KnowledgeBase::builtin(),
            QuizBank::builtin(),
        )
    }

    /// Built-in content with a fixed randomness seed.
    pub fn with_seed(seed: u64) -> Self {
        let config = EngineConfig {
            seed: Some(seed),
            ..EngineConfig::default()
        };
        Self::new(config, KnowledgeBase::builtin(), QuizBank::builtin())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        self.responder.base()
    }

    pub fn quiz_bank(&self) -> &QuizBank {
        &self.quiz_bank
    }

    /// Extractive summary of `text`.
    ///
    /// `length` is one of `short`, `medium`, `long`; `style` is one of
    /// `general`, `academic`, `technical`, `bullet`, `simple`. Anything else
    /// falls back to `medium` / `general`.
    pub fn summarize(&self, text: &str, length: &str, style: &str) -> Result<String, EngineError> {
        self.summarize_with(
            text,
            SummaryLength::parse_or_default(length),
            SummaryStyle::parse_or_default(style),
        )
    }

    pub fn summarize_with(
        &self,
        text: &str,
        length: SummaryLength,
        style: SummaryStyle,
    ) -> Result<String, EngineError> {
        let op = Operation::Summarize;
        self.check_input(op, text)?;
        self.cache
            .memoize(op, text, &format!("{length}/{style}"), || {
                guarded(op, || self.summarizer.summarize(text, length, style))
            })
    }

    /// Up to `flashcard_cap` question/answer cards extracted from `text`.
    pub fn generate_flashcards(&self, text: &str) -> Result<Vec<Flashcard>, EngineError> {
        let op = Operation::Flashcards;
        self.check_input(op, text)?;
        self.cache
            .memoize(op, text, &self.flashcards.cap().to_string(), || {
                guarded(op, || self.flashcards.generate(text))
            })
    }

    /// Answer a free-text question. Never returns an empty string.
    pub fn answer_question(&self, question: &str) -> Result<String, EngineError> {
        let op = Operation::Answer;
        self.check_input(op, question)?;
        self.cache.memoize(op, question, "", || {
            guarded(op, || self.responder.answer(question))
        })
    }

    /// Sample a quiz. Unknown difficulties fall back to `medium`; unknown
    /// topics get a synthetic quiz.
    pub fn generate_quiz(&self, topic: &str, difficulty: &str) -> QuizSet {
        self.generate_quiz_with(topic, Difficulty::parse_or_default(difficulty))
    }

    pub fn generate_quiz_with(&self, topic: &str, difficulty: Difficulty) -> QuizSet {
        let mut rng = self.rng.lock();
        self.quiz_bank
            .generate(topic, difficulty, self.config.quiz_size, &mut *rng)
    }

    /// Score submitted answers against a quiz.
    pub fn grade_quiz(&self, quiz: &QuizSet, answers: &[Option<usize>]) -> QuizResult {
        grade_quiz(quiz, answers)
    }

    /// Educational quotes in shuffled order.
    pub fn educational_quotes(&self) -> Vec<String> {
        catalog::educational_quotes(&mut *self.rng.lock())
    }

    /// Suggested starter questions in shuffled order.
    pub fn quick_questions(&self) -> Vec<String> {
        catalog::quick_questions(&mut *self.rng.lock())
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn recent_latencies(&self) -> Vec<LatencySample> {
        self.cache.recent_latencies()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn check_input(&self, operation: Operation, input: &str) -> Result<(), EngineError> {
        let limit = self.config.max_input_bytes;
        if input.len() > limit {
            tracing::warn!(%operation, len = input.len(), limit, "rejecting oversized input");
            return Err(EngineError::InputTooLarge {
                operation,
                len: input.len(),
                limit,
            });
        }
        Ok(())
    }
}

impl Default for StudyEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for StudyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudyEngine")
            .field("config", &self.config)
            .field("knowledge_entries", &self.knowledge_base().len())
            .field("quiz_questions", &self.quiz_bank.len())
            .field("cache", &self.cache)
            .finish()
    }
}

/// Run `compute`, turning a panic into [`EngineError::Internal`].
fn guarded<T>(operation: Operation, compute: impl FnOnce() -> T) -> Result<T, EngineError> {
    panic::catch_unwind(AssertUnwindSafe(compute)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::error!(%operation, %message, "computation failed");
        EngineError::Internal {
            operation,
            message,
        }
    })
}
