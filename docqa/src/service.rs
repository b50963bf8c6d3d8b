//! Answer orchestration.
//!
//! The [`AnswerService`] runs one query through the full workflow:
//! embed the query, score every document, select the top documents,
//! assemble a sentence-level context, prompt the generator, and finalise the
//! answer with sources and confidence.
//!
//! # Example
//!
//! ```rust,ignore
//! use docqa::{AnswerConfig, AnswerService, Corpus, DirectoryLoader, CorpusLoader};
//!
//! let embedder = Arc::new(my_embedder);
//! let documents = DirectoryLoader::new("documents").load_corpus()?;
//! let corpus = Corpus::embed(documents, embedder.as_ref()).await?;
//!
//! let service = AnswerService::builder()
//!     .config(AnswerConfig::default())
//!     .embedding_provider(embedder)
//!     .generator(Arc::new(my_generator))
//!     .build()?;
//!
//! let result = service.answer("What color is the sky?", &corpus).await?;
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::AnswerConfig;
use crate::context::ContextAssembler;
use crate::corpus::Corpus;
use crate::document::{AnswerResult, Document, ScoredUnit};
use crate::embedding::EmbeddingProvider;
use crate::error::{QaError, Result};
use crate::generation::{AnswerGenerator, build_prompt};
use crate::query::PreparedQuery;
use crate::ranker::{Ranking, select_top};
use crate::scorer::{HybridScorer, ScoringStrategy};
use crate::segment::{DelimiterSegmenter, Segmenter};

/// Answer returned when no document is relevant enough.
pub const FALLBACK_ANSWER: &str = "I'm sorry, but your question doesn't seem to be related to the available context. \
     Please ask a question relevant to the enterprise content.";

/// The stages a request moves through, used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStage {
    /// Query embedded, keywords extracted.
    Received,
    /// Every document scored.
    Scored,
    /// No document reached the threshold; the fallback is returned.
    Rejected,
    /// Top documents chosen.
    Selected,
    /// Sentence-level context assembled.
    ContextBuilt,
    /// Generator returned.
    Generated,
    /// Answer truncated and confidence computed.
    Finalized,
}

impl fmt::Display for AnswerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Scored => "scored",
            Self::Rejected => "rejected",
            Self::Selected => "selected",
            Self::ContextBuilt => "context_built",
            Self::Generated => "generated",
            Self::Finalized => "finalized",
        };
        f.write_str(name)
    }
}

impl AnswerResult {
    /// The fixed answer for queries with no relevant document.
    pub fn fallback() -> Self {
        Self { answer_text: FALLBACK_ANSWER.to_string(), sources: Vec::new(), confidence: 0.0 }
    }
}

/// Truncate `text` to at most `cap` characters.
fn truncate_chars(text: &str, cap: usize) -> String {
    match text.char_indices().nth(cap) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// The answer orchestrator.
///
/// Holds no per-request state: the corpus snapshot is passed into every call
/// and only read, so one service can serve concurrent requests. Construct
/// one via [`AnswerService::builder()`].
pub struct AnswerService {
    config: AnswerConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn AnswerGenerator>,
    scorer: Option<Arc<dyn ScoringStrategy>>,
    segmenter: Arc<dyn Segmenter>,
}

impl AnswerService {
    /// Create a new [`AnswerServiceBuilder`].
    pub fn builder() -> AnswerServiceBuilder {
        AnswerServiceBuilder::default()
    }

    /// Return a reference to the service configuration.
    pub fn config(&self) -> &AnswerConfig {
        &self.config
    }

    /// Answer `query` against `corpus` with the service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::EmbeddingUnavailable`] or
    /// [`QaError::GenerationUnavailable`] when a collaborator fails, and
    /// [`QaError::DimensionMismatch`] when the query embedding does not match
    /// the corpus. No partial result is returned on error.
    pub async fn answer(&self, query: &str, corpus: &Corpus) -> Result<AnswerResult> {
        self.answer_with_config(query, corpus, &self.config).await
    }

    /// Answer `query` against `corpus` with per-call parameters.
    ///
    /// A scoring strategy set on the builder takes precedence over
    /// `config.keyword_boost`.
    ///
    /// # Errors
    ///
    /// As for [`answer`](Self::answer), plus [`QaError::Config`] if `config`
    /// is invalid.
    pub async fn answer_with_config(
        &self,
        query: &str,
        corpus: &Corpus,
        config: &AnswerConfig,
    ) -> Result<AnswerResult> {
        config.validate()?;
        let scorer: Arc<dyn ScoringStrategy> = match &self.scorer {
            Some(scorer) => Arc::clone(scorer),
            None => Arc::new(HybridScorer::new(config.keyword_boost)),
        };

        // Received
        let prepared = PreparedQuery::prepare(query, self.embedding_provider.as_ref()).await?;
        debug!(stage = %AnswerStage::Received, keywords = ?prepared.keywords, "query prepared");

        // Scored
        let scores = Self::score_documents(scorer.as_ref(), &prepared, corpus)?;
        debug!(stage = %AnswerStage::Scored, document_count = scores.len(), "documents scored");

        let selection = match select_top(scores, config.top_n, config.doc_threshold) {
            Ranking::Selected(selection) => selection,
            Ranking::NoRelevantMatch => {
                info!(
                    stage = %AnswerStage::Rejected,
                    threshold = config.doc_threshold,
                    "no document reached the relevance threshold"
                );
                return Ok(AnswerResult::fallback());
            }
        };
        info!(
            stage = %AnswerStage::Selected,
            sources = ?selection.ids(),
            best = selection.max_score().unwrap_or_default(),
            "documents selected"
        );

        // ContextBuilt
        let documents = selection
            .units()
            .iter()
            .map(|unit| {
                corpus.document(&unit.id).ok_or_else(|| {
                    QaError::Corpus(format!("selected document '{}' missing from corpus", unit.id))
                })
            })
            .collect::<Result<Vec<&Document>>>()?;
        let assembler = ContextAssembler::new(
            Arc::clone(&self.embedding_provider),
            scorer,
            Arc::clone(&self.segmenter),
            config.char_budget,
            config.sentence_threshold,
        );
        let context = assembler.assemble(&documents, &prepared).await?;
        if context.is_empty() {
            warn!(stage = %AnswerStage::ContextBuilt, "no sentence passed the sentence threshold");
        } else {
            debug!(
                stage = %AnswerStage::ContextBuilt,
                sentences = context.sentence_count(),
                chars = context.char_len(),
                "context assembled"
            );
        }

        // Generated
        let prompt = build_prompt(query, context.as_str(), config.answer_cap);
        let generated =
            self.generator.generate(&prompt, config.answer_cap).await.inspect_err(|e| {
                error!(error = %e, "answer generation failed");
            })?;
        debug!(stage = %AnswerStage::Generated, chars = generated.chars().count(), "answer generated");

        // Finalized
        let result = AnswerResult {
            answer_text: truncate_chars(&generated, config.answer_cap),
            confidence: selection.mean_score(),
            sources: selection.ids(),
        };
        info!(
            stage = %AnswerStage::Finalized,
            sources = ?result.sources,
            confidence = result.confidence,
            "answer finalized"
        );
        Ok(result)
    }

    fn score_documents(
        scorer: &dyn ScoringStrategy,
        query: &PreparedQuery,
        corpus: &Corpus,
    ) -> Result<Vec<ScoredUnit>> {
        corpus
            .entries()
            .iter()
            .map(|entry| {
                let score =
                    scorer.score(query, Some(&entry.embedding), &entry.document.text)?;
                Ok(ScoredUnit::new(entry.document.id.clone(), score))
            })
            .collect()
    }
}

/// Builder for constructing an [`AnswerService`].
///
/// The embedding provider and generator are required. The configuration
/// defaults to [`AnswerConfig::default()`], the scorer to a [`HybridScorer`]
/// using the configured keyword boost, and the segmenter to a
/// [`DelimiterSegmenter`].
#[derive(Default)]
pub struct AnswerServiceBuilder {
    config: Option<AnswerConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    generator: Option<Arc<dyn AnswerGenerator>>,
    scorer: Option<Arc<dyn ScoringStrategy>>,
    segmenter: Option<Arc<dyn Segmenter>>,
}

impl AnswerServiceBuilder {
    /// Set the service configuration.
    pub fn config(mut self, config: AnswerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the answer generator.
    pub fn generator(mut self, generator: Arc<dyn AnswerGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Replace the scoring strategy.
    pub fn scorer(mut self, scorer: Arc<dyn ScoringStrategy>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Replace the sentence segmenter.
    pub fn segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Build the [`AnswerService`].
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] if a required field is missing or the
    /// configuration is invalid.
    pub fn build(self) -> Result<AnswerService> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| QaError::Config("embedding_provider is required".to_string()))?;
        let generator =
            self.generator.ok_or_else(|| QaError::Config("generator is required".to_string()))?;
        let segmenter =
            self.segmenter.unwrap_or_else(|| Arc::new(DelimiterSegmenter::default()));

        Ok(AnswerService { config, embedding_provider, generator, scorer: self.scorer, segmenter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 800), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn fallback_is_non_empty_and_unsourced() {
        let fallback = AnswerResult::fallback();
        assert!(!fallback.answer_text.is_empty());
        assert!(fallback.sources.is_empty());
        assert_eq!(fallback.confidence, 0.0);
    }

    #[test]
    fn stage_names_are_snake_case() {
        assert_eq!(AnswerStage::ContextBuilt.to_string(), "context_built");
        assert_eq!(AnswerStage::Rejected.to_string(), "rejected");
    }
}
