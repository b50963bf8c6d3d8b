//! Data types for documents, scored units, and answers.

use serde::{Deserialize, Serialize};

/// A source document in the corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Identifier, unique within a corpus (the file name for directory corpora).
    pub id: String,
    /// The raw text content.
    pub text: String,
}

impl Document {
    /// Create a document from an identifier and its text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// A document or sentence identifier paired with its ranking score.
///
/// The score is similarity in `[-1, 1]` plus any keyword boost, so it is
/// only meaningful relative to other scores and thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredUnit {
    /// The unit identifier.
    pub id: String,
    /// The combined score (higher is more relevant).
    pub score: f32,
}

impl ScoredUnit {
    /// Pair an identifier with a score.
    pub fn new(id: impl Into<String>, score: f32) -> Self {
        Self { id: id.into(), score }
    }
}

/// The final answer for a query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerResult {
    /// The generated answer, at most `answer_cap` characters.
    pub answer_text: String,
    /// Identifiers of the selected documents, most relevant first.
    pub sources: Vec<String>,
    /// Mean score of the selected documents, or `0.0` for the fallback.
    ///
    /// Not clamped: keyword boosts can push it above `1.0`.
    pub confidence: f32,
}
