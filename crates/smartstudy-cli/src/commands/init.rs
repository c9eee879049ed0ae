//! The `smartstudy init` command.

use std::path::Path;

use anyhow::{Context, Result};

use smartstudy_core::content::{render_knowledge_base, render_quiz_bank};
use smartstudy_core::knowledge::KnowledgeBase;
use smartstudy_core::quiz::QuizBank;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("smartstudy.toml"), || Ok(SAMPLE_CONFIG.to_string()))?;
    write_if_missing(Path::new("knowledge.toml"), || {
        render_knowledge_base(&KnowledgeBase::builtin())
    })?;
    write_if_missing(Path::new("quiz-bank.toml"), || {
        render_quiz_bank(&QuizBank::builtin())
    })?;

    println!("\nNext steps:");
    println!("  1. Add your own topics to knowledge.toml and quiz-bank.toml");
    println!("  2. Run: smartstudy validate");
    println!("  3. Run: smartstudy ask \"What is photosynthesis?\"");

    Ok(())
}

fn write_if_missing(path: &Path, render: impl FnOnce() -> Result<String>) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    std::fs::write(path, render()?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# smartstudy configuration

# Maximum flashcards per call (0 disables flashcards)
flashcard_cap = 6

# Maximum questions per quiz
quiz_size = 5

# Cached results kept in memory
cache_capacity = 256

# Inputs larger than this many bytes are rejected
max_input_bytes = 200000

# Fixed seed for reproducible quizzes; remove for random order
# seed = 42

# Content files, relative to this file
knowledge_file = "knowledge.toml"
quiz_bank_file = "quiz-bank.toml"
"#;
