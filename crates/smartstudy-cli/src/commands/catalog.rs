//! The `smartstudy quotes` and `smartstudy questions` commands.

use std::path::PathBuf;

use anyhow::Result;

use super::load_engine;

pub fn quotes(config_path: Option<PathBuf>) -> Result<()> {
    let engine = load_engine(config_path.as_deref(), None)?;
    for quote in engine.educational_quotes() {
        println!("{quote}");
    }
    Ok(())
}

pub fn questions(config_path: Option<PathBuf>) -> Result<()> {
    let engine = load_engine(config_path.as_deref(), None)?;
    for question in engine.quick_questions() {
        println!("{question}");
    }
    Ok(())
}
