//! The `smartstudy flashcards` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use smartstudy_core::model::Flashcard;

use super::{load_engine, InputArgs};

pub fn execute(config_path: Option<PathBuf>, input: InputArgs, json: bool) -> Result<()> {
    let text = input.read()?;
    let engine = load_engine(config_path.as_deref(), None)?;
    let cards = engine.generate_flashcards(&text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else if cards.is_empty() {
        println!("No flashcards could be generated. Provide a few complete sentences of study text.");
    } else {
        println!("{}", card_table(&cards));
    }

    Ok(())
}

fn card_table(cards: &[Flashcard]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Front", "Back"]);
    for (i, card) in cards.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&card.front),
            Cell::new(&card.back),
        ]);
    }
    table
}
