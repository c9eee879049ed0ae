//! Keyword-driven question answering.
//!
//! A question is matched against a curated, ordered knowledge base; the
//! first entry with a matching phrase answers it. Questions that match
//! nothing are classified by their leading word and get a templated reply.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One topic in the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Canonical topic phrase, lower case.
    pub key: String,
    /// Additional trigger phrases, lower case.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Canonical answer paragraph.
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(key: &str, aliases: &[&str], answer: &str) -> Self {
        Self {
            key: key.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    /// The key followed by its aliases.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// `question` must already be lower case.
    pub fn matches(&self, question: &str) -> bool {
        self.phrases().any(|phrase| phrase_matches(phrase, question))
    }

    fn normalized(self) -> Self {
        Self {
            key: self.key.trim().to_lowercase(),
            aliases: self
                .aliases
                .into_iter()
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
            answer: self.answer.trim().to_string(),
        }
    }
}

/// A phrase matches when it occurs verbatim, or when each of its words
/// occurs somewhere in the question.
fn phrase_matches(phrase: &str, question: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    question.contains(phrase) || phrase.split_whitespace().all(|word| question.contains(word))
}

/// Ordered, read-only collection of knowledge entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Build a knowledge base; iteration order is the order given.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(KnowledgeEntry::normalized)
                .filter(|e| !e.key.is_empty())
                .collect(),
        }
    }

    /// First entry with an answer that matches `question`.
    pub fn lookup(&self, question: &str) -> Option<&KnowledgeEntry> {
        let question = question.to_lowercase();
        self.entries
            .iter()
            .find(|entry| !entry.answer.is_empty() && entry.matches(&question))
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The built-in curriculum.
    pub fn builtin() -> Self {
        Self::new(vec![
            KnowledgeEntry::new(
                "photosynthesis",
                &["chlorophyll", "plant"],
                "Photosynthesis is the process by which plants convert light energy into chemical energy. Plants use chlorophyll to capture sunlight, combine carbon dioxide from the air with water from the roots, and produce glucose and oxygen. The equation is: 6CO₂ + 6H₂O + light energy → C₆H₁₂O₆ + 6O₂. This process is essential for life on Earth as it produces oxygen and forms the base of food chains.",
            ),
            KnowledgeEntry::new(
                "machine learning",
                &["artificial intelligence"],
                "Machine Learning is a subset of artificial intelligence that enables computers to learn and make decisions from data without being explicitly programmed. It works by identifying patterns in data and using these patterns to make predictions. Common types include supervised learning (learning from labeled examples), unsupervised learning (finding hidden patterns), and reinforcement learning (learning through trial and error).",
            ),
            KnowledgeEntry::new(
                "quadratic equation",
                &["quadratic", "algebra"],
                "A quadratic equation has the form ax² + bx + c = 0. To solve it, you can use: 1) Factoring (if possible), 2) Completing the square, or 3) The quadratic formula: x = [-b ± √(b² - 4ac)] / 2a. The discriminant (b² - 4ac) tells you about the solutions: positive = two real solutions, zero = one solution, negative = no real solutions.",
            ),
            KnowledgeEntry::new(
                "water cycle",
                &["evaporation", "precipitation"],
                "The water cycle is Earth's continuous process of water movement. It includes: 1) Evaporation - water from oceans/lakes becomes vapor, 2) Condensation - vapor cools and forms clouds, 3) Precipitation - water falls as rain/snow, 4) Collection - water gathers in bodies of water, 5) Transpiration - plants release water vapor. This cycle is powered by solar energy and gravity.",
            ),
            KnowledgeEntry::new(
                "theory of relativity",
                &["relativity", "einstein", "spacetime"],
                "Einstein's Theory of Relativity consists of two parts: Special Relativity (1905) shows that space and time are linked as spacetime, and nothing travels faster than light. General Relativity (1915) describes gravity as the curvature of spacetime caused by mass and energy. Key insights include time dilation, length contraction, and the famous equation E=mc².",
            ),
            KnowledgeEntry::new(
                "dna replication",
                &["dna", "genetics"],
                "DNA replication is the process of copying DNA before cell division. Steps: 1) Helicase unwinds the double helix, 2) DNA polymerase adds complementary nucleotides (A with T, G with C), 3) The leading strand is synthesized continuously, while the lagging strand is made in fragments (Okazaki fragments), 4) Ligase joins the fragments. This ensures each new cell has identical genetic information.",
            ),
            KnowledgeEntry::new(
                "programming",
                &["coding", "algorithm"],
                "Programming fundamentals include: 1) Variables (storing data), 2) Data types (numbers, text, booleans), 3) Control structures (if/else, loops), 4) Functions (reusable code blocks), 5) Arrays/Lists (storing multiple values), 6) Object-oriented concepts (classes, objects), 7) Problem-solving approach (breaking problems into smaller parts), 8) Debugging (finding and fixing errors).",
            ),
            KnowledgeEntry::new(
                "shakespeare",
                &["literature"],
                "Shakespeare's writing style features: 1) Iambic pentameter (rhythmic pattern), 2) Rich metaphors and imagery, 3) Wordplay and puns, 4) Soliloquies revealing inner thoughts, 5) Complex characters with psychological depth, 6) Themes of love, power, betrayal, and human nature, 7) Invented many words still used today, 8) Blank verse and rhyming couplets for different effects.",
            ),
            KnowledgeEntry::new(
                "calculus",
                &["derivative", "integral"],
                "Calculus studies continuous change through derivatives and integrals. Derivatives measure rates of change (slope of a curve), while integrals measure accumulation (area under a curve). Key concepts include limits, the fundamental theorem of calculus (connecting derivatives and integrals), and applications in physics, engineering, and economics.",
            ),
            KnowledgeEntry::new(
                "geometry",
                &["triangle", "circle"],
                "Geometry studies shapes, sizes, and spatial relationships. Key concepts include: points, lines, angles, polygons, circles, and three-dimensional shapes. Important theorems include Pythagorean theorem (a² + b² = c²), properties of similar triangles, circle theorems, and formulas for area and volume.",
            ),
        ])
    }
}

/// Question families recognised by their leading word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Definition,
    Procedure,
    Cause,
    General,
}

const LEADING_WORDS: [(QuestionKind, &[&str]); 3] = [
    (QuestionKind::Definition, &["what", "explain", "define"]),
    (QuestionKind::Procedure, &["how", "solve", "calculate"]),
    (QuestionKind::Cause, &["why", "reason", "cause"]),
];

const FILLER_WORDS: [&str; 17] = [
    "is", "are", "was", "were", "do", "does", "did", "can", "could", "should", "would", "i",
    "we", "you", "a", "an", "the",
];

const GENERAL_REPLY: &str = "That's an interesting question! I'm here to help you understand various topics in science, mathematics, programming, and more. Could you provide more specific details about what you'd like to learn? For example, are you looking for a definition, an explanation of a process, or help with a specific problem?";

impl QuestionKind {
    /// Classify by the question's first word.
    pub fn classify(question: &str) -> Self {
        let Some(first) = leading_word(question) else {
            return QuestionKind::General;
        };
        LEADING_WORDS
            .iter()
            .find(|(_, words)| words.contains(&first.as_str()))
            .map(|(kind, _)| *kind)
            .unwrap_or(QuestionKind::General)
    }

    /// Templated reply for a question of this kind about `subject`.
    pub fn reply(&self, subject: &str) -> String {
        match self {
            QuestionKind::Definition => format!(
                "That's a great question about {subject}! This is a topic that involves several connected ideas. I'd recommend starting from a clear definition, then exploring its key components and real-world applications. Would you like me to help you understand a specific aspect of {subject}?"
            ),
            QuestionKind::Procedure => format!(
                "Understanding how to approach {subject} requires looking at the underlying processes and mechanisms. Let's break it down step by step. What specific part would you like to focus on first?"
            ),
            QuestionKind::Cause => format!(
                "Looking for the reasons behind {subject} is a great way to learn. Consider the causes, the conditions that make it possible, and the effects it produces. Which of those would you like to explore?"
            ),
            QuestionKind::General => GENERAL_REPLY.to_string(),
        }
    }
}

fn leading_word(question: &str) -> Option<String> {
    let first = question.split_whitespace().next()?;
    let word: String = first
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();
    (!word.is_empty()).then_some(word)
}

/// What the question is about, with its leading word and filler removed.
pub fn question_subject(question: &str) -> String {
    let trimmed = question.trim().trim_end_matches(['?', '.', '!']).trim();
    let words: Vec<&str> = trimmed.split_whitespace().skip(1).collect();
    let start = words
        .iter()
        .position(|w| !FILLER_WORDS.contains(&w.to_lowercase().as_str()))
        .unwrap_or(words.len());
    let subject = words[start..].join(" ");
    if subject.is_empty() {
        "this topic".to_string()
    } else {
        subject
    }
}

/// Answers free-text questions from a knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeResponder {
    base: Arc<KnowledgeBase>,
}

impl KnowledgeResponder {
    pub fn new(base: Arc<KnowledgeBase>) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &KnowledgeBase {
        &self.base
    }

    /// Answer `question`. Always returns a non-empty string.
    pub fn answer(&self, question: &str) -> String {
        if let Some(entry) = self.base.lookup(question) {
            tracing::debug!(key = %entry.key, "knowledge base match");
            return entry.answer.clone();
        }
        let kind = QuestionKind::classify(question);
        tracing::debug!(?kind, "no knowledge base match, using template");
        kind.reply(&question_subject(question))
    }
}

impl Default for KnowledgeResponder {
    fn default() -> Self {
        Self::new(Arc::new(KnowledgeBase::builtin()))
    }
}
