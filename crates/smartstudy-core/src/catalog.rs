//! Static quotes and suggested questions.

use rand::seq::SliceRandom;
use rand::Rng;

pub const EDUCATIONAL_QUOTES: [&str; 8] = [
    "Education is the most powerful weapon which you can use to change the world. - Nelson Mandela",
    "The beautiful thing about learning is that no one can take it away from you. - B.B. King",
    "Education is not preparation for life; education is life itself. - John Dewey",
    "The capacity to learn is a gift; the ability to learn is a skill; the willingness to learn is a choice. - Brian Herbert",
    "Intelligence plus character - that is the goal of true education. - Martin Luther King Jr.",
    "Education is what remains after one has forgotten what one has learned in school. - Albert Einstein",
    "The mind is not a vessel to be filled, but a fire to be kindled. - Plutarch",
    "Tell me and I forget, teach me and I may remember, involve me and I learn. - Benjamin Franklin",
];

pub const QUICK_QUESTIONS: [&str; 8] = [
    "Explain the concept of photosynthesis",
    "What is machine learning?",
    "How do I solve quadratic equations?",
    "Explain the water cycle",
    "What is the theory of relativity?",
    "How does DNA replication work?",
    "What are the fundamentals of programming?",
    "Explain Shakespeare's writing style",
];

/// All educational quotes in shuffled order.
pub fn educational_quotes<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    shuffled(&EDUCATIONAL_QUOTES, rng)
}

/// All suggested starter questions in shuffled order.
pub fn quick_questions<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    shuffled(&QUICK_QUESTIONS, rng)
}

fn shuffled<R: Rng + ?Sized>(items: &[&str], rng: &mut R) -> Vec<String> {
    let mut out: Vec<String> = items.iter().map(|s| s.to_string()).collect();
    out.shuffle(rng);
    out
}
