//! Subcommand implementations.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use smartstudy_core::config::load_config_from;
use smartstudy_core::StudyEngine;

pub mod ask;
pub mod catalog;
pub mod flashcards;
pub mod init;
pub mod quiz;
pub mod summarize;
pub mod validate;

/// Where a command reads its study text from. Defaults to stdin.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Read text from a .txt file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Use this text directly
    #[arg(long)]
    pub text: Option<String>,
}

impl InputArgs {
    pub fn read(&self) -> Result<String> {
        if let Some(path) = &self.file {
            return read_text_file(path);
        }
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read text from stdin")?;
        Ok(buf)
    }
}

/// Read a UTF-8 `.txt` file.
pub fn read_text_file(path: &Path) -> Result<String> {
    anyhow::ensure!(
        path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt")),
        "only .txt files are supported: {}",
        path.display()
    );
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read input file");
    String::from_utf8(bytes).with_context(|| format!("file is not valid UTF-8: {}", path.display()))
}

/// Load configuration and build the engine, optionally pinning the seed.
pub fn load_engine(config_path: Option<&Path>, seed: Option<u64>) -> Result<StudyEngine> {
    let mut config = load_config_from(config_path)?;
    if seed.is_some() {
        tracing::debug!(?seed, "seed pinned from command line");
        config.seed = seed;
    }
    StudyEngine::from_config(config)
}
