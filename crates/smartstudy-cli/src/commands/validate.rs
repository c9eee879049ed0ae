//! The `smartstudy validate` command.

use std::path::PathBuf;

use anyhow::Result;

use smartstudy_core::config::load_config_from;
use smartstudy_core::content::{
    banked_questions, read_knowledge_base, read_quiz_questions, validate_knowledge_base,
    validate_quiz_bank, ValidationWarning,
};
use smartstudy_core::knowledge::KnowledgeBase;
use smartstudy_core::quiz::QuizBank;

/// Validate the given files, or the configured content when none are given.
pub fn execute(
    config_path: Option<PathBuf>,
    knowledge: Option<PathBuf>,
    quiz_bank: Option<PathBuf>,
) -> Result<()> {
    let (knowledge, quiz_bank) = if knowledge.is_none() && quiz_bank.is_none() {
        let config = load_config_from(config_path.as_deref())?;
        (config.knowledge_file, config.quiz_bank_file)
    } else {
        (knowledge, quiz_bank)
    };

    let mut total_warnings = 0;

    let (source, base) = match &knowledge {
        Some(path) => (path.display().to_string(), read_knowledge_base(path)?),
        None => ("built-in".to_string(), KnowledgeBase::builtin()),
    };
    println!("Knowledge base: {source} ({} entries)", base.len());
    total_warnings += print_warnings(&validate_knowledge_base(&base));

    let (source, questions) = match &quiz_bank {
        Some(path) => (path.display().to_string(), read_quiz_questions(path)?),
        None => ("built-in".to_string(), banked_questions(&QuizBank::builtin())),
    };
    println!("Quiz bank: {source} ({} questions)", questions.len());
    total_warnings += print_warnings(&validate_quiz_bank(&questions));

    if total_warnings == 0 {
        println!("All content valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn print_warnings(warnings: &[ValidationWarning]) -> usize {
    for w in warnings {
        let prefix = w
            .scope
            .as_ref()
            .map(|scope| format!("  [{scope}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
    warnings.len()
}
