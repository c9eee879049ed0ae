//! The `smartstudy ask` command.

use std::path::PathBuf;

use anyhow::Result;

use super::load_engine;

pub fn execute(config_path: Option<PathBuf>, question: Vec<String>) -> Result<()> {
    let engine = load_engine(config_path.as_deref(), None)?;
    let answer = engine.answer_question(&question.join(" "))?;
    println!("{answer}");
    Ok(())
}
