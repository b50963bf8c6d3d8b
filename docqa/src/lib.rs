//! # docqa
//!
//! Question answering over a small, static, in-memory corpus.
//!
//! Documents are scored against a query by cosine similarity plus a keyword
//! boost, the best ones are selected under a relevance threshold, and their
//! most relevant sentences are packed into a fixed character budget. The
//! resulting context is handed to an [`AnswerGenerator`], and the answer is
//! returned with its sources and a confidence score.
//!
//! Embedding and generation are external collaborators behind the
//! [`EmbeddingProvider`] and [`AnswerGenerator`] traits. The scoring formula
//! and sentence segmentation are pluggable through [`ScoringStrategy`] and
//! [`Segmenter`].
//!
//! ## Feature flags
//!
//! | Feature  | Enables |
//! |----------|---------|
//! | `openai` | `OpenAIEmbeddingProvider` and `OpenAIGenerator` |

pub mod config;
pub mod context;
pub mod corpus;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod hashing;
pub mod lexical;
pub mod query;
pub mod ranker;
pub mod scorer;
pub mod segment;
pub mod service;
pub mod vector;

#[cfg(feature = "openai")]
pub mod openai;

pub use config::{AnswerConfig, AnswerConfigBuilder};
pub use context::{AssembledContext, ContextAssembler, SENTENCE_SEPARATOR};
pub use corpus::{Corpus, CorpusEntry, CorpusLoader, DirectoryLoader};
pub use document::{AnswerResult, Document, ScoredUnit};
pub use embedding::EmbeddingProvider;
pub use error::{QaError, Result};
pub use generation::{AnswerGenerator, build_prompt};
pub use hashing::HashingEmbeddingProvider;
pub use lexical::{Keywords, contains_any_keyword, extract_keywords};
pub use query::PreparedQuery;
pub use ranker::{RankedSelection, Ranking, select_top};
pub use scorer::{HybridScorer, ScoringStrategy, SemanticScorer};
pub use segment::{DelimiterSegmenter, Segmenter};
pub use service::{AnswerService, AnswerServiceBuilder, AnswerStage, FALLBACK_ANSWER};
pub use vector::cosine_similarity;

#[cfg(feature = "openai")]
pub use openai::{OpenAIEmbeddingProvider, OpenAIGenerator};
