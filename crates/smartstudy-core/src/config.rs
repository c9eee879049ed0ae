//! Engine configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_LATENCY_LOG_CAPACITY};
use crate::flashcards::DEFAULT_FLASHCARD_CAP;
use crate::quiz::DEFAULT_QUIZ_SIZE;

/// Default upper bound on a single input, in bytes.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 200_000;

/// File name searched for in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "smartstudy.toml";

/// Environment variable that overrides `seed`.
pub const SEED_ENV_VAR: &str = "SMARTSTUDY_SEED";

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum flashcards per call. 0 disables generation.
    #[serde(default = "default_flashcard_cap")]
    pub flashcard_cap: usize,
    /// Maximum questions per generated quiz.
    #[serde(default = "default_quiz_size")]
    pub quiz_size: usize,
    /// Maximum cached results.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Number of latency samples kept for diagnostics.
    #[serde(default = "default_latency_log_capacity")]
    pub latency_log_capacity: usize,
    /// Inputs longer than this many bytes are rejected.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
    /// Fixed seed for quiz sampling and shuffling. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// TOML knowledge base replacing the built-in one.
    #[serde(default)]
    pub knowledge_file: Option<PathBuf>,
    /// TOML quiz bank replacing the built-in one.
    #[serde(default)]
    pub quiz_bank_file: Option<PathBuf>,
}

fn default_flashcard_cap() -> usize {
    DEFAULT_FLASHCARD_CAP
}
fn default_quiz_size() -> usize {
    DEFAULT_QUIZ_SIZE
}
fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}
fn default_latency_log_capacity() -> usize {
    DEFAULT_LATENCY_LOG_CAPACITY
}
fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            flashcard_cap: default_flashcard_cap(),
            quiz_size: default_quiz_size(),
            cache_capacity: default_cache_capacity(),
            latency_log_capacity: default_latency_log_capacity(),
            max_input_bytes: default_max_input_bytes(),
            seed: None,
            knowledge_file: None,
            quiz_bank_file: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut cursor = 0;
    while let Some(offset) = result[cursor..].find("${") {
        let start = cursor + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let value = std::env::var(&result[start + 2..start + end]).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        cursor = start + value.len();
    }
    result
}

/// Expand `${VAR}` references and anchor relative paths at `base`.
fn resolve_content_path(path: &Path, base: Option<&Path>) -> PathBuf {
    let expanded = PathBuf::from(resolve_env_vars(&path.to_string_lossy()));
    match base {
        Some(dir) if expanded.is_relative() => dir.join(expanded),
        _ => expanded,
    }
}

fn apply_seed_override(config: &mut EngineConfig, value: Option<&str>) -> Result<()> {
    if let Some(raw) = value {
        let seed = raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{SEED_ENV_VAR} must be an unsigned integer, got {raw:?}"))?;
        config.seed = Some(seed);
    }
    Ok(())
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `smartstudy.toml` in the current directory
/// 2. `~/.config/smartstudy/config.toml`
///
/// Environment variable override: `SMARTSTUDY_SEED`.
pub fn load_config() -> Result<EngineConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
///
/// Relative content paths in the file are resolved against the file's
/// directory.
pub fn load_config_from(path: Option<&Path>) -> Result<EngineConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let mut config = toml::from_str::<EngineConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            let base = path.parent();
            config.knowledge_file = config
                .knowledge_file
                .as_deref()
                .map(|p| resolve_content_path(p, base));
            config.quiz_bank_file = config
                .quiz_bank_file
                .as_deref()
                .map(|p| resolve_content_path(p, base));
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => EngineConfig::default(),
    };

    apply_seed_override(&mut config, std::env::var(SEED_ENV_VAR).ok().as_deref())?;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("smartstudy"))
}
