//! TOML content files.
//!
//! Knowledge bases and quiz banks can be loaded from disk to replace the
//! built-in tables, and validated for common authoring mistakes.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::knowledge::{KnowledgeBase, KnowledgeEntry};
use crate::model::{Difficulty, QuizQuestion};
use crate::quiz::{QuizBank, EXPECTED_OPTION_COUNT};

#[derive(Debug, Serialize, Deserialize)]
struct TomlKnowledgeFile {
    #[serde(default)]
    entries: Vec<KnowledgeEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlQuizFile {
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlQuestion {
    topic: String,
    #[serde(default = "default_difficulty_str")]
    difficulty: String,
    question: String,
    options: Vec<String>,
    correct: usize,
    #[serde(default)]
    explanation: String,
}

fn default_difficulty_str() -> String {
    Difficulty::default().to_string()
}

/// A quiz question together with the group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankedQuestion {
    pub topic: String,
    pub difficulty: Difficulty,
    pub question: QuizQuestion,
}

/// Every question in `bank` with its group, in bank order.
pub fn banked_questions(bank: &QuizBank) -> Vec<BankedQuestion> {
    bank.iter()
        .map(|(topic, difficulty, question)| BankedQuestion {
            topic: topic.to_string(),
            difficulty,
            question: question.clone(),
        })
        .collect()
}

/// Load a knowledge base file, logging validation warnings.
pub fn load_knowledge_base(path: &Path) -> Result<KnowledgeBase> {
    let base = read_knowledge_base(path)?;
    for warning in validate_knowledge_base(&base) {
        tracing::warn!(path = %path.display(), "{warning}");
    }
    Ok(base)
}

/// Read and parse a knowledge base file without validating it.
pub fn read_knowledge_base(path: &Path) -> Result<KnowledgeBase> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read knowledge base: {}", path.display()))?;

    parse_knowledge_base_str(&content, path)
}

/// Parse a knowledge base from a TOML string.
pub fn parse_knowledge_base_str(content: &str, source_path: &Path) -> Result<KnowledgeBase> {
    let parsed: TomlKnowledgeFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(KnowledgeBase::new(parsed.entries))
}

/// Load a quiz bank file, logging validation warnings.
///
/// Questions with the wrong option count or an out-of-range answer index
/// are dropped.
pub fn load_quiz_bank(path: &Path) -> Result<QuizBank> {
    let questions = read_quiz_questions(path)?;
    for warning in validate_quiz_bank(&questions) {
        tracing::warn!(path = %path.display(), "{warning}");
    }
    Ok(QuizBank::from_questions(
        questions
            .into_iter()
            .map(|q| (q.topic, q.difficulty, q.question)),
    ))
}

/// Read and parse a quiz bank file, keeping invalid questions.
pub fn read_quiz_questions(path: &Path) -> Result<Vec<BankedQuestion>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz bank: {}", path.display()))?;

    parse_quiz_questions_str(&content, path)
}

/// Parse quiz questions from a TOML string without dropping invalid ones.
pub fn parse_quiz_questions_str(content: &str, source_path: &Path) -> Result<Vec<BankedQuestion>> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    parsed
        .questions
        .into_iter()
        .map(|q| {
            let difficulty: Difficulty = q
                .difficulty
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}: {}", source_path.display(), e))?;
            Ok(BankedQuestion {
                topic: q.topic,
                difficulty,
                question: QuizQuestion {
                    question: q.question,
                    options: q.options,
                    correct: q.correct,
                    explanation: q.explanation,
                },
            })
        })
        .collect()
}

/// Serialize a knowledge base in the file format `load_knowledge_base` reads.
pub fn render_knowledge_base(base: &KnowledgeBase) -> Result<String> {
    let file = TomlKnowledgeFile {
        entries: base.entries().to_vec(),
    };
    toml::to_string_pretty(&file).context("failed to serialize knowledge base")
}

/// Serialize a quiz bank in the file format `load_quiz_bank` reads.
pub fn render_quiz_bank(bank: &QuizBank) -> Result<String> {
    let file = TomlQuizFile {
        questions: bank
            .iter()
            .map(|(topic, difficulty, q)| TomlQuestion {
                topic: topic.to_string(),
                difficulty: difficulty.to_string(),
                question: q.question.clone(),
                options: q.options.clone(),
                correct: q.correct,
                explanation: q.explanation.clone(),
            })
            .collect(),
    };
    toml::to_string_pretty(&file).context("failed to serialize quiz bank")
}

/// A warning from content validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Entry key or question text the warning is about.
    pub scope: Option<String>,
    /// Warning message.
    pub message: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "[{scope}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Validate a knowledge base for common issues.
pub fn validate_knowledge_base(base: &KnowledgeBase) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let entries = base.entries();

    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.key.as_str()) {
            warnings.push(ValidationWarning {
                scope: Some(entry.key.clone()),
                message: format!("duplicate key: {}", entry.key),
            });
        }
    }

    for entry in entries {
        if entry.answer.is_empty() {
            warnings.push(ValidationWarning {
                scope: Some(entry.key.clone()),
                message: "answer is empty".into(),
            });
        }
    }

    // An earlier key contained in a later one always wins the lookup.
    for (i, later) in entries.iter().enumerate() {
        if let Some(earlier) = entries[..i]
            .iter()
            .find(|e| e.key != later.key && later.key.contains(e.key.as_str()))
        {
            warnings.push(ValidationWarning {
                scope: Some(later.key.clone()),
                message: format!("key is shadowed by earlier key '{}'", earlier.key),
            });
        }
    }

    warnings
}

/// Validate quiz questions for common issues.
pub fn validate_quiz_bank(questions: &[BankedQuestion]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for q in questions {
        let scope = Some(format!("{}/{}", q.topic, q.difficulty));
        if q.question.options.len() != EXPECTED_OPTION_COUNT {
            warnings.push(ValidationWarning {
                scope: scope.clone(),
                message: format!(
                    "'{}' has {} options, expected {EXPECTED_OPTION_COUNT}; it will be dropped",
                    q.question.question,
                    q.question.options.len()
                ),
            });
        }
        if !q.question.is_valid() {
            warnings.push(ValidationWarning {
                scope: scope.clone(),
                message: format!(
                    "'{}' has correct index {} out of range; it will be dropped",
                    q.question.question, q.question.correct
                ),
            });
        }
        if q.question.question.trim().is_empty() {
            warnings.push(ValidationWarning {
                scope,
                message: "question text is empty".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const KNOWLEDGE_TOML: &str = r#"
[[entries]]
key = "Volcano"
aliases = ["magma", "lava"]
answer = "A volcano is an opening in the crust through which magma escapes."

[[entries]]
key = "plate tectonics"
answer = "Plate tectonics describes the motion of the lithosphere."
"#;

    const QUIZ_TOML: &str = r#"
[[questions]]
topic = "geology"
difficulty = "easy"
question = "What is molten rock called underground?"
options = ["Lava", "Magma", "Basalt", "Ash"]
correct = 1
explanation = "Below the surface it is magma."

[[questions]]
topic = "geology"
question = "Which layer lies beneath the crust?"
options = ["Core", "Mantle"]
correct = 3
"#;

    #[test]
    fn parse_knowledge_entries() {
        let base = parse_knowledge_base_str(KNOWLEDGE_TOML, &PathBuf::from("kb.toml")).unwrap();
        assert_eq!(base.len(), 2);
        assert_eq!(base.entries()[0].key, "volcano");
        assert_eq!(base.entries()[1].aliases.len(), 0);
        assert_eq!(
            base.lookup("Where does LAVA come from?").map(|e| e.key.as_str()),
            Some("volcano")
        );
    }

    #[test]
    fn parse_quiz_questions_keeps_invalid_for_validation() {
        let questions =
            parse_quiz_questions_str(QUIZ_TOML, &PathBuf::from("quiz.toml")).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].difficulty, Difficulty::Easy);
        assert_eq!(questions[1].difficulty, Difficulty::Medium);
        assert!(questions[1].question.explanation.is_empty());

        let warnings = validate_quiz_bank(&questions);
        assert!(warnings.iter().any(|w| w.message.contains("2 options")));
        assert!(warnings.iter().any(|w| w.message.contains("out of range")));
        assert!(warnings.iter().all(|w| w.scope.as_deref() != Some("geology/easy")));
    }

    #[test]
    fn unknown_difficulty_is_an_error() {
        let toml = r#"
[[questions]]
topic = "geology"
difficulty = "extreme"
question = "?"
options = ["a", "b", "c", "d"]
correct = 0
"#;
        let err = parse_quiz_questions_str(toml, &PathBuf::from("quiz.toml")).unwrap_err();
        assert!(err.to_string().contains("unknown difficulty"));
    }

    #[test]
    fn load_quiz_bank_drops_invalid_questions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(&path, QUIZ_TOML).unwrap();

        let bank = load_quiz_bank(&path).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.topics(), vec!["geology"]);
    }

    #[test]
    fn loaded_questions_always_have_four_options() {
        let toml = r#"
[[questions]]
topic = "art"
difficulty = "easy"
question = "Which is a primary color?"
options = ["Green", "Red"]
correct = 1
explanation = "Red is primary."

[[questions]]
topic = "art"
difficulty = "easy"
question = "Who painted the Mona Lisa?"
options = ["Monet", "Da Vinci", "Picasso", "Dali"]
correct = 1
explanation = "Leonardo da Vinci."
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(&path, toml).unwrap();

        let bank = load_quiz_bank(&path).unwrap();
        assert_eq!(bank.len(), 1);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = bank.generate("art", Difficulty::Easy, 5, &mut rng);
            assert_eq!(quiz.questions.len(), 1);
            assert!(quiz
                .questions
                .iter()
                .all(|q| q.options.len() == EXPECTED_OPTION_COUNT));
        }
    }

    #[test]
    fn validate_knowledge_duplicates_and_shadowing() {
        let base = KnowledgeBase::new(vec![
            KnowledgeEntry::new("cell", &[], "Cells are units of life."),
            KnowledgeEntry::new("cell division", &[], "Mitosis and meiosis."),
            KnowledgeEntry::new("cell", &[], ""),
        ]);
        let warnings = validate_knowledge_base(&base);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate key")));
        assert!(warnings.iter().any(|w| w.message == "answer is empty"));
        assert!(warnings
            .iter()
            .any(|w| w.scope.as_deref() == Some("cell division") && w.message.contains("shadowed")));
    }

    #[test]
    fn builtin_content_is_clean() {
        assert!(validate_knowledge_base(&KnowledgeBase::builtin()).is_empty());
        assert!(validate_quiz_bank(&banked_questions(&QuizBank::builtin())).is_empty());
    }

    #[test]
    fn rendered_content_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let kb_path = dir.path().join("knowledge.toml");
        let quiz_path = dir.path().join("quiz.toml");
        std::fs::write(&kb_path, render_knowledge_base(&KnowledgeBase::builtin()).unwrap()).unwrap();
        std::fs::write(&quiz_path, render_quiz_bank(&QuizBank::builtin()).unwrap()).unwrap();

        assert_eq!(load_knowledge_base(&kb_path).unwrap(), KnowledgeBase::builtin());
        assert_eq!(load_quiz_bank(&quiz_path).unwrap(), QuizBank::builtin());
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_knowledge_base_str("[[entries]\nkey = ", &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_knowledge_base(Path::new("/nonexistent/kb.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/kb.toml"));
    }
}
