//! Budget-bounded context assembly at sentence granularity.

use std::sync::Arc;

use tracing::{debug, error};

use crate::document::Document;
use crate::embedding::EmbeddingProvider;
use crate::error::{QaError, Result};
use crate::query::PreparedQuery;
use crate::ranker::descending;
use crate::scorer::ScoringStrategy;
use crate::segment::Segmenter;

/// Separator appended after every accepted sentence.
pub const SENTENCE_SEPARATOR: &str = ". ";

/// The context handed to the answer generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledContext {
    text: String,
    sentence_count: usize,
}

impl AssembledContext {
    /// The context text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the context, returning its text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Number of accepted sentences.
    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    /// Length of the context in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns `true` if no sentence was accepted.
    pub fn is_empty(&self) -> bool {
        self.sentence_count == 0
    }
}

struct ScoredSentence<'a> {
    text: &'a str,
    chars: usize,
    score: f32,
}

/// Builds a context string from the sentences of selected documents.
///
/// Every sentence is embedded and scored against the query. Within each
/// document, sentences are taken best first; a sentence is accepted when its
/// score reaches `sentence_threshold` and it still fits in `char_budget`.
/// Budget checks happen before the separator is appended, so the result can
/// exceed the budget by at most one [`SENTENCE_SEPARATOR`].
pub struct ContextAssembler {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    scorer: Arc<dyn ScoringStrategy>,
    segmenter: Arc<dyn Segmenter>,
    char_budget: usize,
    sentence_threshold: f32,
}

impl ContextAssembler {
    /// Create an assembler.
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        scorer: Arc<dyn ScoringStrategy>,
        segmenter: Arc<dyn Segmenter>,
        char_budget: usize,
        sentence_threshold: f32,
    ) -> Self {
        Self { embedding_provider, scorer, segmenter, char_budget, sentence_threshold }
    }

    /// Assemble the context for `documents`, given in selection order.
    ///
    /// # Errors
    ///
    /// Propagates embedding failures and dimension mismatches.
    pub async fn assemble(
        &self,
        documents: &[&Document],
        query: &PreparedQuery,
    ) -> Result<AssembledContext> {
        let mut context = AssembledContext::default();
        let mut used = 0usize;

        for document in documents {
            let mut sentences = self.score_sentences(document, query).await?;
            sentences.sort_by(|a, b| descending(a.score, b.score));

            let mut accepted = 0usize;
            for sentence in sentences {
                if sentence.score < self.sentence_threshold {
                    continue;
                }
                if used + sentence.chars > self.char_budget {
                    continue;
                }
                context.text.push_str(sentence.text);
                context.text.push_str(SENTENCE_SEPARATOR);
                used += sentence.chars + SENTENCE_SEPARATOR.chars().count();
                accepted += 1;
            }
            context.sentence_count += accepted;
            debug!(doc.id = %document.id, accepted, used, budget = self.char_budget, "assembled document sentences");
        }

        Ok(context)
    }

    async fn score_sentences<'a>(
        &self,
        document: &'a Document,
        query: &PreparedQuery,
    ) -> Result<Vec<ScoredSentence<'a>>> {
        let units = self.segmenter.segment(&document.text);
        if units.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = self.embedding_provider.embed_batch(&units).await.inspect_err(|e| {
            error!(doc.id = %document.id, error = %e, "sentence embedding failed");
        })?;
        if embeddings.len() != units.len() {
            return Err(QaError::EmbeddingUnavailable {
                provider: "sentence".to_string(),
                message: format!(
                    "expected {} sentence embeddings for '{}', got {}",
                    units.len(),
                    document.id,
                    embeddings.len()
                ),
            });
        }

        units
            .into_iter()
            .zip(embeddings)
            .map(|(text, embedding)| {
                let score = self.scorer.score(query, Some(&embedding), text)?;
                Ok(ScoredSentence { text, chars: text.chars().count(), score })
            })
            .collect()
    }
}
