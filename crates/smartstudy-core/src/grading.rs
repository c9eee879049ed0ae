//! Scoring submitted quiz answers.

use serde::{Deserialize, Serialize};

use crate::model::QuizSet;

/// Outcome for one answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedAnswer {
    /// Position of the question in the quiz.
    pub question_index: usize,
    pub user_answer: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: String,
}

/// Result of grading a whole quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    /// Number of questions in the quiz, answered or not.
    pub total: usize,
    /// `score / total` as a rounded percentage; 0 for an empty quiz.
    pub percentage: u32,
    pub answers: Vec<GradedAnswer>,
}

/// Grade `answers` against `quiz`.
///
/// `answers[i]` is the chosen option for question `i`; `None` or a missing
/// entry means unanswered. Entries past the last question are ignored.
pub fn grade_quiz(quiz: &QuizSet, answers: &[Option<usize>]) -> QuizResult {
    let graded: Vec<GradedAnswer> = quiz
        .questions
        .iter()
        .zip(answers.iter())
        .enumerate()
        .filter_map(|(i, (question, answer))| {
            answer.map(|user_answer| GradedAnswer {
                question_index: i,
                user_answer,
                correct_answer: question.correct,
                is_correct: user_answer == question.correct,
                explanation: question.explanation.clone(),
            })
        })
        .collect();

    let score = graded.iter().filter(|a| a.is_correct).count();
    let total = quiz.questions.len();
    let percentage = if total > 0 {
        (score as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };

    QuizResult {
        score,
        total,
        percentage,
        answers: graded,
    }
}
