//! Per-request query signals.

use tracing::error;

use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::lexical::{Keywords, extract_keywords};

/// A query with its embedding and keyword set, valid for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    /// The original query text.
    pub text: String,
    /// The query embedding.
    pub embedding: Vec<f32>,
    /// Lowercased, stopword-filtered keywords.
    pub keywords: Keywords,
}

impl PreparedQuery {
    /// Build a query from precomputed parts.
    pub fn new(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        let text = text.into();
        let keywords = extract_keywords(&text);
        Self { text, embedding, keywords }
    }

    /// Embed the query through `provider` and extract its keywords.
    ///
    /// # Errors
    ///
    /// Propagates the provider's error unchanged.
    pub async fn prepare(text: &str, provider: &dyn EmbeddingProvider) -> Result<Self> {
        let embedding = provider.embed(text).await.inspect_err(|e| {
            error!(error = %e, "query embedding failed");
        })?;
        Ok(Self::new(text, embedding))
    }
}
