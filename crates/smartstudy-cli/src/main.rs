//! smartstudy CLI: summaries, flashcards, answers and quizzes from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::InputArgs;

#[derive(Parser)]
#[command(name = "smartstudy", version, about = "Offline study helper")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a text
    Summarize {
        #[command(flatten)]
        input: InputArgs,

        /// Summary length: short, medium, long
        #[arg(long, default_value = "medium")]
        length: String,

        /// Summary style: general, academic, technical, bullet, simple
        #[arg(long, default_value = "general")]
        style: String,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Extract flashcards from a text
    Flashcards {
        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Ask a question
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Generate a quiz, optionally grading answers
    Quiz {
        /// Quiz topic (e.g. science, math, programming)
        #[arg(long)]
        topic: String,

        /// Difficulty: easy, medium
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// Fixed seed for question selection
        #[arg(long)]
        seed: Option<u64>,

        /// Comma-separated 0-based answers to grade (e.g. "1,0,2"; empty = skipped)
        #[arg(long)]
        answers: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print educational quotes
    Quotes,

    /// Print suggested starter questions
    Questions,

    /// Validate knowledge base and quiz bank files
    Validate {
        /// Knowledge base TOML file
        #[arg(long)]
        knowledge: Option<PathBuf>,

        /// Quiz bank TOML file
        #[arg(long)]
        quiz_bank: Option<PathBuf>,
    },

    /// Create starter config and content files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("smartstudy=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Summarize {
            input,
            length,
            style,
            json,
        } => commands::summarize::execute(config, input, length, style, json),
        Commands::Flashcards { input, json } => commands::flashcards::execute(config, input, json),
        Commands::Ask { question } => commands::ask::execute(config, question),
        Commands::Quiz {
            topic,
            difficulty,
            seed,
            answers,
            json,
        } => commands::quiz::execute(config, topic, difficulty, seed, answers, json),
        Commands::Quotes => commands::catalog::quotes(config),
        Commands::Questions => commands::catalog::questions(config),
        Commands::Validate {
            knowledge,
            quiz_bank,
        } => commands::validate::execute(config, knowledge, quiz_bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
