//! Curated quiz bank with random selection.
//!
//! Questions are grouped by (topic, difficulty). A request for a known group
//! samples without replacement; anything else gets a small synthetic quiz
//! that names the requested topic.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Difficulty, QuizQuestion, QuizSet};

/// Default maximum number of questions per quiz.
pub const DEFAULT_QUIZ_SIZE: usize = 5;

/// Options every banked question must have.
pub const EXPECTED_OPTION_COUNT: usize = 4;

/// Read-only question bank keyed by lower-case topic and difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizBank {
    groups: BTreeMap<(String, Difficulty), Vec<QuizQuestion>>,
}

impl QuizBank {
    /// Build a bank from `(topic, difficulty, question)` triples.
    ///
    /// Questions without exactly [`EXPECTED_OPTION_COUNT`] options, or whose
    /// `correct` index is out of range, are dropped.
    pub fn from_questions<I>(questions: I) -> Self
    where
        I: IntoIterator<Item = (String, Difficulty, QuizQuestion)>,
    {
        let mut groups: BTreeMap<(String, Difficulty), Vec<QuizQuestion>> = BTreeMap::new();
        for (topic, difficulty, question) in questions {
            if question.options.len() != EXPECTED_OPTION_COUNT {
                tracing::warn!(
                    topic = %topic,
                    question = %question.question,
                    options = question.options.len(),
                    "dropping quiz question with wrong option count"
                );
                continue;
            }
            if !question.is_valid() {
                tracing::warn!(
                    topic = %topic,
                    question = %question.question,
                    "dropping quiz question with out-of-range answer index"
                );
                continue;
            }
            groups
                .entry((topic.trim().to_lowercase(), difficulty))
                .or_default()
                .push(question);
        }
        Self { groups }
    }

    /// Questions for a topic/difficulty pair, if the bank has any.
    pub fn questions(&self, topic: &str, difficulty: Difficulty) -> Option<&[QuizQuestion]> {
        self.groups
            .get(&(topic.trim().to_lowercase(), difficulty))
            .map(Vec::as_slice)
    }

    /// Topics with at least one question, sorted and deduplicated.
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = self.groups.keys().map(|(t, _)| t.as_str()).collect();
        topics.dedup();
        topics
    }

    /// Every question in the bank with its group.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Difficulty, &QuizQuestion)> {
        self.groups.iter().flat_map(|((topic, difficulty), questions)| {
            questions.iter().map(move |q| (topic.as_str(), *difficulty, q))
        })
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Build a quiz of at most `max_questions` questions.
    ///
    /// The returned set always has at least one question and echoes `topic`
    /// as given.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        topic: &str,
        difficulty: Difficulty,
        max_questions: usize,
        rng: &mut R,
    ) -> QuizSet {
        let questions = match self.questions(topic, difficulty) {
            Some(bank) if max_questions > 0 => {
                let count = bank.len().min(max_questions);
                tracing::debug!(topic, %difficulty, count, "sampling quiz questions");
                bank.choose_multiple(rng, count).cloned().collect()
            }
            _ => {
                tracing::debug!(topic, %difficulty, "no curated questions, using fallback quiz");
                fallback_questions(topic)
            }
        };

        QuizSet {
            topic: topic.to_string(),
            difficulty,
            questions,
        }
    }

    /// The built-in question bank.
    pub fn builtin() -> Self {
        let mut all = Vec::new();
        for (topic, difficulty, questions) in builtin_groups() {
            for q in questions {
                all.push((topic.to_string(), difficulty, q));
            }
        }
        Self::from_questions(all)
    }
}

/// Synthetic questions for topics the bank does not cover.
pub fn fallback_questions(topic: &str) -> Vec<QuizQuestion> {
    let topic = if topic.trim().is_empty() {
        "this subject"
    } else {
        topic.trim()
    };
    vec![
        question(
            &format!("What is an important concept in {topic}?"),
            &["Concept A", "Concept B", "Concept C", "All of the above"],
            3,
            &format!("This is a general question about {topic}. Consider studying the fundamental concepts and principles."),
        ),
        question(
            &format!("Which approach is most effective for learning {topic}?"),
            &["Memorization only", "Practice and understanding", "Reading alone", "Watching videos only"],
            1,
            "The most effective learning combines practice, understanding concepts, and applying knowledge.",
        ),
    ]
    .into_iter()
    .filter(QuizQuestion::is_valid)
    .collect()
}

fn question(text: &str, options: &[&str], correct: usize, explanation: &str) -> QuizQuestion {
    QuizQuestion {
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct,
        explanation: explanation.to_string(),
    }
}

fn builtin_groups() -> Vec<(&'static str, Difficulty, Vec<QuizQuestion>)> {
    vec![
        (
            "science",
            Difficulty::Easy,
            vec![
                question(
                    "What gas do plants take in during photosynthesis?",
                    &["Oxygen", "Carbon Dioxide", "Nitrogen", "Helium"],
                    1,
                    "Plants take in carbon dioxide from the air and release oxygen during photosynthesis. This process converts light energy into chemical energy.",
                ),
                question(
                    "How many bones are in an adult human body?",
                    &["206", "250", "186", "300"],
                    0,
                    "An adult human skeleton has 206 bones. Babies are born with about 270 bones, but many fuse together as they grow.",
                ),
                question(
                    "What is the center of an atom called?",
                    &["Electron", "Proton", "Nucleus", "Neutron"],
                    2,
                    "The nucleus is the dense center of an atom containing protons and neutrons, while electrons orbit around it.",
                ),
                question(
                    "Which planet is closest to the Sun?",
                    &["Venus", "Mercury", "Earth", "Mars"],
                    1,
                    "Mercury is the closest planet to the Sun, with an average distance of about 36 million miles.",
                ),
            ],
        ),
        (
            "science",
            Difficulty::Medium,
            vec![
                question(
                    "What is the powerhouse of the cell?",
                    &["Nucleus", "Mitochondria", "Ribosome", "Endoplasmic Reticulum"],
                    1,
                    "Mitochondria produce ATP (adenosine triphosphate), the energy currency of cells, through cellular respiration.",
                ),
                question(
                    "Which law states that energy cannot be created or destroyed?",
                    &["Newton's First Law", "Law of Conservation of Energy", "Law of Gravity", "Ohm's Law"],
                    1,
                    "The Law of Conservation of Energy states that energy can only be transformed from one form to another, never created or destroyed.",
                ),
                question(
                    "What is the chemical formula for water?",
                    &["CO2", "H2O", "NaCl", "CH4"],
                    1,
                    "Water has the chemical formula H2O, meaning each molecule contains two hydrogen atoms and one oxygen atom.",
                ),
                question(
                    "What type of bond holds the two strands of DNA together?",
                    &["Ionic bonds", "Covalent bonds", "Hydrogen bonds", "Van der Waals forces"],
                    2,
                    "Hydrogen bonds hold the complementary base pairs together in the DNA double helix structure.",
                ),
            ],
        ),
        (
            "math",
            Difficulty::Easy,
            vec![
                question(
                    "What is 15% of 200?",
                    &["30", "25", "35", "20"],
                    0,
                    "To find 15% of 200: 0.15 × 200 = 30",
                ),
                question(
                    "If a triangle has angles of 60° and 70°, what is the third angle?",
                    &["50°", "60°", "45°", "40°"],
                    0,
                    "The sum of angles in a triangle is always 180°. So 180° - 60° - 70° = 50°",
                ),
                question(
                    "What is the area of a rectangle with length 8 and width 5?",
                    &["40", "26", "13", "35"],
                    0,
                    "Area of rectangle = length × width = 8 × 5 = 40 square units",
                ),
            ],
        ),
        (
            "math",
            Difficulty::Medium,
            vec![
                question(
                    "What is the derivative of x²?",
                    &["x", "2x", "x²", "2"],
                    1,
                    "Using the power rule: d/dx(x²) = 2x¹ = 2x",
                ),
                question(
                    "Solve for x: 2x + 5 = 13",
                    &["4", "3", "6", "9"],
                    0,
                    "2x + 5 = 13 → 2x = 8 → x = 4",
                ),
                question(
                    "What is the circumference of a circle with radius 3?",
                    &["6π", "9π", "3π", "12π"],
                    0,
                    "Circumference = 2πr = 2π(3) = 6π",
                ),
            ],
        ),
        (
            "programming",
            Difficulty::Easy,
            vec![
                question(
                    "Which symbol is used for comments in Python?",
                    &["//", "#", "/*", "<!--"],
                    1,
                    "In Python, the # symbol is used for single-line comments.",
                ),
                question(
                    "What does HTML stand for?",
                    &["High Tech Modern Language", "HyperText Markup Language", "Home Tool Markup Language", "Hyperlink and Text Markup Language"],
                    1,
                    "HTML stands for HyperText Markup Language, used for creating web pages.",
                ),
                question(
                    "Which data type would you use to store a whole number in most programming languages?",
                    &["float", "string", "integer", "boolean"],
                    2,
                    "Integer data type is used to store whole numbers without decimal points.",
                ),
            ],
        ),
        (
            "programming",
            Difficulty::Medium,
            vec![
                question(
                    "What is the time complexity of binary search?",
                    &["O(n)", "O(log n)", "O(n²)", "O(1)"],
                    1,
                    "Binary search has O(log n) time complexity because it eliminates half the search space in each iteration.",
                ),
                question(
                    "In object-oriented programming, what is encapsulation?",
                    &["Inheriting properties", "Hiding internal details", "Creating multiple objects", "Overriding methods"],
                    1,
                    "Encapsulation is the principle of hiding internal implementation details and exposing only necessary interfaces.",
                ),
                question(
                    "What does SQL stand for?",
                    &["Simple Query Language", "Structured Query Language", "Standard Query Language", "Sequential Query Language"],
                    1,
                    "SQL stands for Structured Query Language, used for managing relational databases.",
                ),
            ],
        ),
    ]
}
