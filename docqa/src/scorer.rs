//! Scoring strategies for ranking documents and sentences against a query.

use crate::error::Result;
use crate::lexical::contains_any_keyword;
use crate::query::PreparedQuery;
use crate::vector::cosine_similarity;

/// A strategy that scores one text unit against a query.
///
/// Implementations decide how semantic and lexical signals combine. The
/// ranker and context assembler only compare the resulting numbers, so a
/// strategy can use any scale as long as thresholds are configured to match.
pub trait ScoringStrategy: Send + Sync {
    /// Score a unit. `unit_embedding` is `None` when no embedding exists.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::DimensionMismatch`](crate::QaError::DimensionMismatch)
    /// if the embeddings have different lengths.
    fn score(
        &self,
        query: &PreparedQuery,
        unit_embedding: Option<&[f32]>,
        unit_text: &str,
    ) -> Result<f32>;
}

/// Cosine similarity plus a flat boost when any query keyword appears.
///
/// The sum is not normalised: with the default boost of `0.5` a perfect
/// match scores `1.5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridScorer {
    keyword_boost: f32,
}

impl HybridScorer {
    /// Create a scorer with the given keyword boost.
    pub fn new(keyword_boost: f32) -> Self {
        Self { keyword_boost }
    }

    /// The boost added on a keyword match.
    pub fn keyword_boost(&self) -> f32 {
        self.keyword_boost
    }
}

impl Default for HybridScorer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ScoringStrategy for HybridScorer {
    fn score(
        &self,
        query: &PreparedQuery,
        unit_embedding: Option<&[f32]>,
        unit_text: &str,
    ) -> Result<f32> {
        let similarity = match unit_embedding {
            Some(embedding) => cosine_similarity(&query.embedding, embedding)?,
            None => 0.0,
        };
        let boost =
            if contains_any_keyword(unit_text, &query.keywords) { self.keyword_boost } else { 0.0 };
        Ok(similarity + boost)
    }
}

/// Pure cosine similarity, ignoring keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticScorer;

impl ScoringStrategy for SemanticScorer {
    fn score(
        &self,
        query: &PreparedQuery,
        unit_embedding: Option<&[f32]>,
        _unit_text: &str,
    ) -> Result<f32> {
        match unit_embedding {
            Some(embedding) => cosine_similarity(&query.embedding, embedding),
            None => Ok(0.0),
        }
    }
}
