//! The embedding collaborator.

use async_trait::async_trait;

use crate::error::Result;

/// Turns text into fixed-length vectors for cosine scoring.
///
/// A provider must return vectors of exactly [`dimensions`](Self::dimensions)
/// components for as long as a corpus built with it is in use. Documents are
/// embedded once at corpus build time; queries and sentences on every request.
///
/// Report failures as
/// [`QaError::EmbeddingUnavailable`](crate::QaError::EmbeddingUnavailable).
///
/// ```rust,ignore
/// let vector = provider.embed("What color is the sky?").await?;
/// assert_eq!(vector.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts, preserving input order.
    ///
    /// Falls back to one [`embed`](Self::embed) call per text; backends with
    /// a native batch endpoint should override it.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Length of every vector this provider returns.
    fn dimensions(&self) -> usize;
}
