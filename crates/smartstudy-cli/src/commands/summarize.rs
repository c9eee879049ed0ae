//! The `smartstudy summarize` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use smartstudy_core::model::{SummaryLength, SummaryStyle};

use super::{load_engine, InputArgs};

#[derive(Serialize)]
struct SummaryOutput {
    length: SummaryLength,
    style: SummaryStyle,
    summary: String,
}

pub fn execute(
    config_path: Option<PathBuf>,
    input: InputArgs,
    length: String,
    style: String,
    json: bool,
) -> Result<()> {
    let text = input.read()?;
    let engine = load_engine(config_path.as_deref(), None)?;

    let length = SummaryLength::parse_or_default(&length);
    let style = SummaryStyle::parse_or_default(&style);
    let summary = engine.summarize_with(&text, length, style)?;

    if json {
        let output = SummaryOutput {
            length,
            style,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{summary}");
    }

    Ok(())
}
