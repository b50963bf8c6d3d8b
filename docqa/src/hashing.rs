//! Deterministic offline embeddings from hashed word features.

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::{QaError, Result};

/// An [`EmbeddingProvider`] that needs no model or network.
///
/// Each lowercased word is hashed into one of `dimensions` buckets with a
/// hash-derived sign, and the resulting vector is L2-normalised. Texts that
/// share words therefore have positive cosine similarity. Useful for demos,
/// tests and air-gapped deployments where keyword-level recall is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingEmbeddingProvider {
    dimensions: usize,
}

impl HashingEmbeddingProvider {
    /// Default vector size.
    pub const DEFAULT_DIMENSIONS: usize = 256;

    /// Create a provider producing vectors of `dimensions` components.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] if `dimensions` is zero.
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(QaError::Config("hashing dimensions must be greater than zero".into()));
        }
        Ok(Self { dimensions })
    }

    fn hash(token: &str) -> u64 {
        token.bytes().fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
            (acc ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
        })
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];
        for word in text.split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
            if word.is_empty() {
                continue;
            }
            let hash = Self::hash(&word);
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|x| *x /= norm);
        }
        embedding
    }
}

impl Default for HashingEmbeddingProvider {
    fn default() -> Self {
        Self { dimensions: Self::DEFAULT_DIMENSIONS }
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_sync(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::cosine_similarity;

    #[tokio::test]
    async fn vectors_are_normalised_and_deterministic() {
        let provider = HashingEmbeddingProvider::default();
        let a = provider.embed("The sky is blue").await.unwrap();
        let b = provider.embed("the SKY is blue!").await.unwrap();
        assert_eq!(a.len(), HashingEmbeddingProvider::DEFAULT_DIMENSIONS);
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn shared_words_raise_similarity() {
        let provider = HashingEmbeddingProvider::new(512).unwrap();
        let query = provider.embed("sky color").await.unwrap();
        let related = provider.embed("the color of the sky").await.unwrap();
        let unrelated = provider.embed("tax forms are due in april").await.unwrap();
        let related_score = cosine_similarity(&query, &related).unwrap();
        let unrelated_score = cosine_similarity(&query, &unrelated).unwrap();
        assert!(related_score > unrelated_score);
    }

    #[tokio::test]
    async fn blank_text_embeds_to_zero_vector() {
        let provider = HashingEmbeddingProvider::new(8).unwrap();
        assert_eq!(provider.embed("  ?! ").await.unwrap(), vec![0.0; 8]);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(HashingEmbeddingProvider::new(0), Err(QaError::Config(_))));
    }
}
