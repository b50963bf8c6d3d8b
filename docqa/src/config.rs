//! Configuration for answering queries.

use serde::{Deserialize, Serialize};

use crate::error::{QaError, Result};

/// Tuning parameters for retrieval, context assembly and answer finalisation.
///
/// Scores mix cosine similarity with an additive keyword boost, so thresholds
/// are compared against values that can exceed 1.0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnswerConfig {
    /// Maximum number of documents selected for the context.
    pub top_n: usize,
    /// Maximum character length of the assembled context.
    pub char_budget: usize,
    /// Minimum best document score required to answer at all.
    pub doc_threshold: f32,
    /// Minimum score for a sentence to enter the context.
    pub sentence_threshold: f32,
    /// Score increment when any query keyword appears in the text.
    pub keyword_boost: f32,
    /// Hard cap on the answer length in characters.
    pub answer_cap: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            top_n: 3,
            char_budget: 450,
            doc_threshold: 0.3,
            sentence_threshold: 0.3,
            keyword_boost: 0.5,
            answer_cap: 800,
        }
    }
}

impl AnswerConfig {
    /// Create a new builder for constructing an [`AnswerConfig`].
    pub fn builder() -> AnswerConfigBuilder {
        AnswerConfigBuilder::default()
    }

    /// Check that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] if:
    /// - `answer_cap == 0`
    /// - any threshold or the keyword boost is not finite
    ///
    /// `top_n == 0` is allowed; it selects nothing, so every query gets the
    /// fallback answer.
    pub fn validate(&self) -> Result<()> {
        if self.answer_cap == 0 {
            return Err(QaError::Config("answer_cap must be greater than zero".to_string()));
        }
        for (name, value) in [
            ("doc_threshold", self.doc_threshold),
            ("sentence_threshold", self.sentence_threshold),
            ("keyword_boost", self.keyword_boost),
        ] {
            if !value.is_finite() {
                return Err(QaError::Config(format!("{name} must be finite, got {value}")));
            }
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`AnswerConfig`].
#[derive(Debug, Clone, Default)]
pub struct AnswerConfigBuilder {
    config: AnswerConfig,
}

impl AnswerConfigBuilder {
    /// Set the number of documents to select.
    pub fn top_n(mut self, n: usize) -> Self {
        self.config.top_n = n;
        self
    }

    /// Set the context budget in characters.
    pub fn char_budget(mut self, budget: usize) -> Self {
        self.config.char_budget = budget;
        self
    }

    /// Set the document relevance threshold.
    pub fn doc_threshold(mut self, threshold: f32) -> Self {
        self.config.doc_threshold = threshold;
        self
    }

    /// Set the sentence relevance threshold.
    pub fn sentence_threshold(mut self, threshold: f32) -> Self {
        self.config.sentence_threshold = threshold;
        self
    }

    /// Set the keyword boost added on a lexical match.
    pub fn keyword_boost(mut self, boost: f32) -> Self {
        self.config.keyword_boost = boost;
        self
    }

    /// Set the answer length cap in characters.
    pub fn answer_cap(mut self, cap: usize) -> Self {
        self.config.answer_cap = cap;
        self
    }

    /// Build the [`AnswerConfig`], validating the parameters.
    ///
    /// # Errors
    ///
    /// See [`AnswerConfig::validate`].
    pub fn build(self) -> Result<AnswerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AnswerConfig::default();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.char_budget, 450);
        assert_eq!(config.doc_threshold, 0.3);
        assert_eq!(config.sentence_threshold, 0.3);
        assert_eq!(config.keyword_boost, 0.5);
        assert_eq!(config.answer_cap, 800);
    }

    #[test]
    fn builder_accepts_zero_top_n() {
        let config = AnswerConfig::builder().top_n(0).build().unwrap();
        assert_eq!(config.top_n, 0);
    }

    #[test]
    fn builder_rejects_zero_answer_cap() {
        let err = AnswerConfig::builder().answer_cap(0).build().unwrap_err();
        assert!(matches!(err, QaError::Config(_)));
    }

    #[test]
    fn builder_rejects_non_finite_threshold() {
        let err = AnswerConfig::builder().doc_threshold(f32::NAN).build().unwrap_err();
        assert!(err.to_string().contains("doc_threshold"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AnswerConfig = serde_json::from_str(r#"{"top_n": 5}"#).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.char_budget, 450);
    }
}
