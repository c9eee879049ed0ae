//! End-to-end tests through the public engine API with on-disk content.
//!
//! These tests load a config file that points at custom knowledge and quiz
//! files, then exercise every engine operation against that content.

use std::path::Path;

use smartstudy_core::config::load_config_from;
use smartstudy_core::content::{render_knowledge_base, render_quiz_bank};
use smartstudy_core::knowledge::KnowledgeBase;
use smartstudy_core::model::Difficulty;
use smartstudy_core::quiz::QuizBank;
use smartstudy_core::StudyEngine;

const KNOWLEDGE: &str = r#"
[[entries]]
key = "plate tectonics"
aliases = ["earthquake", "continental drift"]
answer = "Plate tectonics describes the slow motion of the plates that make up Earth's lithosphere."

[[entries]]
key = "volcano"
aliases = ["magma", "lava"]
answer = "A volcano is an opening in Earth's crust through which molten rock escapes."
"#;

const QUIZ: &str = r#"
[[questions]]
topic = "Geology"
difficulty = "easy"
question = "What is molten rock called underground?"
options = ["Lava", "Magma", "Basalt", "Ash"]
correct = 1
explanation = "Below the surface it is called magma."

[[questions]]
topic = "geology"
difficulty = "easy"
question = "Which layer lies beneath the crust?"
options = ["Core", "Mantle", "Lithosphere", "Atmosphere"]
correct = 1
explanation = "The mantle lies beneath the crust."

[[questions]]
topic = "geology"
difficulty = "easy"
question = "Broken question"
options = ["a", "b"]
correct = 7
"#;

const NOTES: &str = "Plate tectonics is the theory that Earth's outer shell is divided into large plates. \
The plates move slowly over the mantle and interact at their boundaries. \
Earthquakes are sudden releases of energy where plates grind against each other. \
Volcanoes often form where one plate sinks beneath another plate.";

fn write_content(dir: &Path, seed: u64) -> std::path::PathBuf {
    std::fs::write(dir.join("knowledge.toml"), KNOWLEDGE).unwrap();
    std::fs::write(dir.join("quiz.toml"), QUIZ).unwrap();
    let config_path = dir.join("smartstudy.toml");
    std::fs::write(
        &config_path,
        format!(
            "seed = {seed}\nflashcard_cap = 3\nquiz_size = 5\n\
             knowledge_file = \"knowledge.toml\"\nquiz_bank_file = \"quiz.toml\"\n"
        ),
    )
    .unwrap();
    config_path
}

fn engine_in(dir: &Path, seed: u64) -> StudyEngine {
    let config_path = write_content(dir, seed);
    let config = load_config_from(Some(&config_path)).unwrap();
    StudyEngine::from_config(config).unwrap()
}

#[test]
fn e2e_custom_knowledge_base() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(dir.path(), 1);

    assert_eq!(engine.knowledge_base().len(), 2);
    let answer = engine.answer_question("What causes an earthquake?").unwrap();
    assert!(answer.starts_with("Plate tectonics describes"));
    let answer = engine.answer_question("Where does LAVA come from?").unwrap();
    assert!(answer.starts_with("A volcano is"));

    // Built-in topics are replaced, not merged.
    let answer = engine.answer_question("What is photosynthesis?").unwrap();
    assert!(answer.contains("photosynthesis"));
    assert!(!answer.starts_with("Photosynthesis is the process"));
}

#[test]
fn e2e_custom_quiz_bank() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(dir.path(), 9);

    // The broken question is dropped at load time.
    assert_eq!(engine.quiz_bank().len(), 2);

    let quiz = engine.generate_quiz("geology", "easy");
    assert_eq!(quiz.topic, "geology");
    assert_eq!(quiz.difficulty, Difficulty::Easy);
    assert_eq!(quiz.questions.len(), 2);
    assert!(quiz.questions.iter().all(|q| q.correct < q.options.len()));

    let answers: Vec<Option<usize>> = quiz.questions.iter().map(|_| Some(1)).collect();
    let result = engine.grade_quiz(&quiz, &answers);
    assert_eq!(result.score, 2);
    assert_eq!(result.percentage, 100);

    // Built-in topics are gone, so they fall back.
    let fallback = engine.generate_quiz("science", "easy");
    assert!(fallback.questions[0].question.contains("science"));
}

#[test]
fn e2e_text_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(dir.path(), 2);

    let summary = engine.summarize(NOTES, "short", "technical").unwrap();
    assert!(!summary.is_empty());
    assert!(NOTES.contains(summary.trim_end_matches('.')));

    let cards = engine.generate_flashcards(NOTES).unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].front, "What is Plate tectonics?");

    // Second pass is served from the cache.
    engine.summarize(NOTES, "short", "technical").unwrap();
    engine.generate_flashcards(NOTES).unwrap();
    let stats = engine.cache_stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.capacity, 256);
}

#[test]
fn e2e_seed_from_config_is_reproducible() {
    let a_dir = tempfile::tempdir().unwrap();
    let b_dir = tempfile::tempdir().unwrap();
    let a = engine_in(a_dir.path(), 42);
    let b = engine_in(b_dir.path(), 42);

    assert_eq!(a.educational_quotes(), b.educational_quotes());
    assert_eq!(a.generate_quiz("geology", "easy"), b.generate_quiz("geology", "easy"));
    assert_eq!(a.quick_questions(), b.quick_questions());
}

#[test]
fn e2e_rendered_builtin_content_matches() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("knowledge.toml"),
        render_knowledge_base(&KnowledgeBase::builtin()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("quiz.toml"),
        render_quiz_bank(&QuizBank::builtin()).unwrap(),
    )
    .unwrap();
    let config_path = dir.path().join("smartstudy.toml");
    std::fs::write(
        &config_path,
        "seed = 5\nknowledge_file = \"knowledge.toml\"\nquiz_bank_file = \"quiz.toml\"\n",
    )
    .unwrap();

    let load = || StudyEngine::from_config(load_config_from(Some(&config_path)).unwrap()).unwrap();

    let from_files = load();
    let builtin = StudyEngine::with_seed(5);
    assert_eq!(from_files.quick_questions(), builtin.quick_questions());
    for question in builtin.quick_questions() {
        assert_eq!(
            from_files.answer_question(&question).unwrap(),
            builtin.answer_question(&question).unwrap()
        );
    }

    // Same seed and no prior draws on either side.
    assert_eq!(
        load().generate_quiz("programming", "medium"),
        StudyEngine::with_seed(5).generate_quiz("programming", "medium")
    );
}
