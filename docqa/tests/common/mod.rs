//! Deterministic collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docqa::{AnswerGenerator, EmbeddingProvider, PreparedQuery, QaError, ScoringStrategy};

/// Looks embeddings up by exact text, falling back to a default vector.
pub struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
    default: Vec<f32>,
    fail_on: Option<String>,
    calls: AtomicUsize,
}

impl TableEmbedder {
    pub fn new(default: Vec<f32>) -> Self {
        Self { table: HashMap::new(), default, fail_on: None, calls: AtomicUsize::new(0) }
    }

    pub fn with(mut self, text: &str, embedding: Vec<f32>) -> Self {
        self.table.insert(text.to_string(), embedding);
        self
    }

    /// Fail whenever `text` is embedded.
    pub fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for TableEmbedder {
    async fn embed(&self, text: &str) -> docqa::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.as_deref() == Some(text) {
            return Err(QaError::EmbeddingUnavailable {
                provider: "table".into(),
                message: format!("refused to embed '{text}'"),
            });
        }
        Ok(self.table.get(text).cloned().unwrap_or_else(|| self.default.clone()))
    }

    fn dimensions(&self) -> usize {
        self.default.len()
    }
}

/// Returns a fixed answer and records the prompts it receives.
pub struct FixedGenerator {
    answer: String,
    prompts: Mutex<Vec<(String, usize)>>,
}

impl FixedGenerator {
    pub fn new(answer: &str) -> Self {
        Self { answer: answer.to_string(), prompts: Mutex::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<(String, usize)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerGenerator for FixedGenerator {
    async fn generate(&self, prompt: &str, max_length: usize) -> docqa::Result<String> {
        self.prompts.lock().unwrap().push((prompt.to_string(), max_length));
        Ok(self.answer.clone())
    }
}

/// Always fails.
pub struct FailingGenerator;

#[async_trait]
impl AnswerGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _max_length: usize) -> docqa::Result<String> {
        Err(QaError::GenerationUnavailable { provider: "failing".into(), message: "offline".into() })
    }
}

/// Scores units by exact text lookup, `0.0` for unknown text.
pub struct FixedScorer {
    scores: HashMap<String, f32>,
}

impl FixedScorer {
    pub fn new(pairs: &[(&str, f32)]) -> Self {
        Self { scores: pairs.iter().map(|(text, score)| (text.to_string(), *score)).collect() }
    }
}

impl ScoringStrategy for FixedScorer {
    fn score(
        &self,
        _query: &PreparedQuery,
        _unit_embedding: Option<&[f32]>,
        unit_text: &str,
    ) -> docqa::Result<f32> {
        Ok(self.scores.get(unit_text).copied().unwrap_or(0.0))
    }
}
