//! Collaborator construction from settings.

use std::sync::Arc;

use anyhow::Context;
use docqa::{
    AnswerGenerator, EmbeddingProvider, HashingEmbeddingProvider, OpenAIEmbeddingProvider,
    OpenAIGenerator,
};

use crate::config::{EmbeddingBackend, EmbeddingSettings, GenerationSettings};

pub fn embedding_provider(settings: &EmbeddingSettings) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    match settings.backend {
        EmbeddingBackend::Hashing => {
            let dimensions =
                settings.dimensions.unwrap_or(HashingEmbeddingProvider::DEFAULT_DIMENSIONS);
            Ok(Arc::new(HashingEmbeddingProvider::new(dimensions)?))
        }
        EmbeddingBackend::Openai => {
            let mut provider = OpenAIEmbeddingProvider::from_env()
                .context("openai embedding backend needs OPENAI_API_KEY")?;
            if let Some(base_url) = &settings.base_url {
                provider = provider.with_base_url(base_url);
            }
            if let Some(model) = &settings.model {
                provider = provider.with_model(model);
            }
            if let Some(dims) = settings.dimensions {
                provider = provider.with_dimensions(dims);
            }
            Ok(Arc::new(provider))
        }
    }
}

pub fn generator(settings: &GenerationSettings) -> anyhow::Result<Arc<dyn AnswerGenerator>> {
    let mut generator =
        OpenAIGenerator::from_env().context("answer generation needs OPENAI_API_KEY")?;
    if let Some(base_url) = &settings.base_url {
        generator = generator.with_base_url(base_url);
    }
    if let Some(model) = &settings.model {
        generator = generator.with_model(model);
    }
    if let Some(temperature) = settings.temperature {
        generator = generator.with_temperature(temperature);
    }
    Ok(Arc::new(generator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_backend_honours_dimensions() {
        let settings = EmbeddingSettings { dimensions: Some(64), ..Default::default() };
        let provider = embedding_provider(&settings).unwrap();
        assert_eq!(provider.dimensions(), 64);
    }

    #[test]
    fn hashing_backend_rejects_zero_dimensions() {
        let settings = EmbeddingSettings { dimensions: Some(0), ..Default::default() };
        assert!(embedding_provider(&settings).is_err());
    }
}
