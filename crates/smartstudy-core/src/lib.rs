//! smartstudy-core: offline text analysis for study material.
//!
//! Extractive summaries, rule-based flashcards, keyword question answering
//! and quiz sampling over curated content, behind a memoizing engine facade.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod flashcards;
pub mod grading;
pub mod knowledge;
pub mod model;
pub mod quiz;
pub mod summarizer;
pub mod text;

pub use engine::StudyEngine;
pub use error::EngineError;
