//! The `smartstudy quiz` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use serde::Serialize;

use smartstudy_core::grading::QuizResult;
use smartstudy_core::model::QuizSet;

use super::load_engine;

#[derive(Serialize)]
struct GradedQuiz<'a> {
    quiz: &'a QuizSet,
    result: &'a QuizResult,
}

pub fn execute(
    config_path: Option<PathBuf>,
    topic: String,
    difficulty: String,
    seed: Option<u64>,
    answers: Option<String>,
    json: bool,
) -> Result<()> {
    let engine = load_engine(config_path.as_deref(), seed)?;
    let quiz = engine.generate_quiz(&topic, &difficulty);

    let Some(answers) = answers else {
        if json {
            println!("{}", serde_json::to_string_pretty(&quiz)?);
        } else {
            print_quiz(&quiz);
        }
        return Ok(());
    };

    let answers = parse_answers(&answers)?;
    let result = engine.grade_quiz(&quiz, &answers);
    if json {
        let output = GradedQuiz {
            quiz: &quiz,
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_result(&quiz, &result);
    }

    Ok(())
}

/// Parse `"1,0,,2"` into per-question answers; empty slots are unanswered.
pub fn parse_answers(raw: &str) -> Result<Vec<Option<usize>>> {
    raw.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(i, item)| {
            if item.is_empty() {
                Ok(None)
            } else {
                item.parse::<usize>()
                    .map(Some)
                    .with_context(|| format!("answer {} is not an option index: {item:?}", i + 1))
            }
        })
        .collect()
}

fn print_quiz(quiz: &QuizSet) {
    println!("Quiz: {} ({})", quiz.topic, quiz.difficulty);
    for (i, question) in quiz.questions.iter().enumerate() {
        println!("\n{}. {}", i + 1, question.question);
        for (j, option) in question.options.iter().enumerate() {
            println!("   [{j}] {option}");
        }
    }
}

fn print_result(quiz: &QuizSet, result: &QuizResult) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct", "Result"]);

    for graded in &result.answers {
        let Some(question) = quiz.questions.get(graded.question_index) else {
            continue;
        };
        let option = |idx: usize| {
            question
                .options
                .get(idx)
                .map(|o| format!("[{idx}] {o}"))
                .unwrap_or_else(|| format!("[{idx}]"))
        };
        table.add_row(vec![
            Cell::new(graded.question_index + 1),
            Cell::new(&question.question),
            Cell::new(option(graded.user_answer)),
            Cell::new(option(graded.correct_answer)),
            Cell::new(if graded.is_correct { "correct" } else { "wrong" }),
        ]);
    }

    println!("Quiz: {} ({})", quiz.topic, quiz.difficulty);
    println!("{table}");
    println!(
        "Score: {}/{} ({}%)",
        result.score, result.total, result.percentage
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_answer_list() {
        assert_eq!(
            parse_answers("1, 0,,2").unwrap(),
            vec![Some(1), Some(0), None, Some(2)]
        );
        assert_eq!(parse_answers("").unwrap(), vec![None]);
    }

    #[test]
    fn reject_non_numeric_answers() {
        let err = parse_answers("1,b").unwrap_err();
        assert!(err.to_string().contains("answer 2"));
    }
}
