//! Behavioral scenarios and properties of the engine's call surface.

use rand::rngs::StdRng;
use rand::SeedableRng;

use smartstudy_core::model::Difficulty;
use smartstudy_core::quiz::{QuizBank, DEFAULT_QUIZ_SIZE};
use smartstudy_core::summarizer::EMPTY_SUMMARY;
use smartstudy_core::text::SentenceSplitter;
use smartstudy_core::StudyEngine;

const TEXTS: [&str; 5] = [
    "Water is H2O. It is essential for life. Plants need water to grow.",
    "The mitochondria produces energy for the cell! Ribosomes assemble proteins from amino acids. \
     The nucleus stores genetic information. Lysosomes break down waste materials? \
     The cell membrane controls what enters and leaves.",
    "Research methodology shapes the findings of every study.\nA theory without analysis is incomplete.\n\
     The conclusion summarizes the research. Careful study design avoids bias.",
    "An algorithm is a method for solving a problem. Data structures organize data in memory. \
     Each function should implement one process. The system calls the function repeatedly.",
    "Short. Tiny. The sentence long enough to count is here. Another sentence that counts as well. x.",
];

const LENGTHS: [&str; 3] = ["short", "medium", "long"];
const STYLES: [&str; 5] = ["general", "academic", "technical", "bullet", "simple"];

fn sentences(text: &str) -> Vec<String> {
    SentenceSplitter::general()
        .split(text)
        .into_iter()
        .map(|s| s.text)
        .collect()
}

// --- Concrete scenarios ---

#[test]
fn scenario_short_general_summary_picks_one_sentence() {
    let engine = StudyEngine::builtin();
    let summary = engine
        .summarize(
            "Water is H2O. It is essential for life. Plants need water to grow.",
            "short",
            "general",
        )
        .unwrap();
    assert_eq!(summary, "Plants need water to grow.");
}

#[test]
fn scenario_single_sentence_is_returned_verbatim() {
    let engine = StudyEngine::builtin();
    for length in LENGTHS {
        for style in STYLES {
            assert_eq!(
                engine
                    .summarize("  Machine learning is a subset of AI ", length, style)
                    .unwrap(),
                "Machine learning is a subset of AI"
            );
        }
    }
}

#[test]
fn scenario_definition_flashcard() {
    let engine = StudyEngine::builtin();
    let cards = engine
        .generate_flashcards(
            "Photosynthesis is the process by which plants convert light into energy.",
        )
        .unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].front, "What is Photosynthesis?");
    assert_eq!(
        cards[0].back,
        "the process by which plants convert light into energy."
    );
}

#[test]
fn scenario_photosynthesis_answer() {
    let engine = StudyEngine::builtin();
    let expected = engine.knowledge_base().entries()[0].answer.clone();
    assert_eq!(
        engine.answer_question("How does photosynthesis work?").unwrap(),
        expected
    );
}

#[test]
fn scenario_unknown_topic_quiz() {
    let engine = StudyEngine::builtin();
    let quiz = engine.generate_quiz("history", "medium");
    assert_eq!(quiz.topic, "history");
    assert!(!quiz.questions.is_empty());
    assert!(quiz.questions.iter().all(|q| q.correct < q.options.len()));
}

// --- Properties ---

#[test]
fn summary_is_an_ordered_subsequence() {
    let engine = StudyEngine::builtin();
    for text in TEXTS {
        let source = sentences(text);
        if source.len() < 2 {
            continue;
        }
        for length in LENGTHS {
            for style in STYLES {
                let summary = engine.summarize(text, length, style).unwrap();
                let picked = sentences(&summary);
                let target = length.parse::<smartstudy_core::model::SummaryLength>()
                    .unwrap()
                    .target_sentences(source.len());
                assert!(!picked.is_empty());
                assert!(picked.len() <= target, "{length}/{style}: {summary:?}");

                let mut cursor = 0;
                for sentence in &picked {
                    let found = source[cursor..]
                        .iter()
                        .position(|s| s == sentence)
                        .unwrap_or_else(|| panic!("{sentence:?} not in source order"));
                    cursor += found + 1;
                }
            }
        }
    }
}

#[test]
fn summary_is_deterministic_across_engines() {
    let a = StudyEngine::with_seed(1);
    let b = StudyEngine::with_seed(2);
    for text in TEXTS {
        for style in STYLES {
            assert_eq!(
                a.summarize(text, "medium", style).unwrap(),
                b.summarize(text, "medium", style).unwrap()
            );
        }
    }
}

#[test]
fn insufficient_text_is_returned_trimmed() {
    let engine = StudyEngine::builtin();
    assert_eq!(engine.summarize("", "short", "general").unwrap(), EMPTY_SUMMARY);
    assert_eq!(engine.summarize("Hi. Yo.", "long", "academic").unwrap(), "Hi. Yo.");
    assert_eq!(
        engine.summarize(" One usable sentence here. ok. ", "short", "general").unwrap(),
        "One usable sentence here. ok."
    );
}

#[test]
fn flashcards_are_bounded_and_non_empty() {
    let engine = StudyEngine::builtin();
    let long = TEXTS.join(" ").repeat(3);
    for text in TEXTS.iter().copied().chain([long.as_str()]) {
        let cards = engine.generate_flashcards(text).unwrap();
        assert!(cards.len() <= 6);
        for card in &cards {
            assert!(!card.front.trim().is_empty());
            assert!(!card.back.trim().is_empty());
        }
    }
    assert!(engine.generate_flashcards("Too short to study.").unwrap().is_empty());
}

#[test]
fn answers_are_total() {
    let engine = StudyEngine::builtin();
    for question in [
        "",
        "   ",
        "?",
        "What is entropy?",
        "how do magnets work",
        "WHY is the sky blue?",
        "Tell me something",
        "ñandú?",
    ] {
        assert!(!engine.answer_question(question).unwrap().is_empty(), "{question:?}");
    }
}

#[test]
fn curated_quizzes_sample_without_duplicates() {
    let bank = QuizBank::builtin();
    for topic in bank.topics() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium] {
            let Some(pool) = bank.questions(topic, difficulty) else {
                continue;
            };
            for seed in 0..20 {
                let quiz = bank.generate(
                    topic,
                    difficulty,
                    DEFAULT_QUIZ_SIZE,
                    &mut StdRng::seed_from_u64(seed),
                );
                assert!(quiz.questions.len() <= DEFAULT_QUIZ_SIZE);
                assert!(quiz.questions.iter().all(|q| pool.contains(q)));
                for (i, q) in quiz.questions.iter().enumerate() {
                    assert!(!quiz.questions[i + 1..].contains(q), "duplicate in {topic}");
                }
            }
        }
    }
}

#[test]
fn absent_pairs_fall_back_with_echoed_topic() {
    let engine = StudyEngine::with_seed(8);
    for topic in ["History", "", "  art  ", "science fiction"] {
        let quiz = engine.generate_quiz(topic, "easy");
        assert_eq!(quiz.topic, topic);
        assert!(!quiz.questions.is_empty());
    }
}
