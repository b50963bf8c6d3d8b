//! Read-only corpus snapshots and corpus loaders.
//!
//! A [`Corpus`] pairs every [`Document`] with exactly one embedding of a
//! shared dimension. It is built once, before serving, and then shared
//! read-only across requests (typically behind an `Arc`).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::document::Document;
use crate::embedding::EmbeddingProvider;
use crate::error::{QaError, Result};

/// A document together with its embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusEntry {
    /// The document.
    pub document: Document,
    /// The document embedding.
    pub embedding: Vec<f32>,
}

/// An immutable snapshot of documents and their embeddings.
///
/// Entries keep their insertion order, which is also the tie-break order
/// when documents score equally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
    index: HashMap<String, usize>,
    dimensions: usize,
}

impl Corpus {
    /// Embed every document once through `provider` and build the snapshot.
    ///
    /// # Errors
    ///
    /// Propagates provider failures, and returns
    /// [`QaError::DimensionMismatch`] or [`QaError::Corpus`] when the
    /// resulting snapshot would violate its invariants.
    pub async fn embed(documents: Vec<Document>, provider: &dyn EmbeddingProvider) -> Result<Self> {
        if documents.is_empty() {
            info!(document_count = 0, "built empty corpus");
            return Ok(Self::default());
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = provider.embed_batch(&texts).await.inspect_err(|e| {
            error!(error = %e, "embedding failed while building corpus");
        })?;
        if embeddings.len() != documents.len() {
            return Err(QaError::Corpus(format!(
                "provider returned {} embeddings for {} documents",
                embeddings.len(),
                documents.len()
            )));
        }

        let corpus = Self::from_entries(
            documents
                .into_iter()
                .zip(embeddings)
                .map(|(document, embedding)| CorpusEntry { document, embedding }),
        )?;
        info!(document_count = corpus.len(), dimensions = corpus.dimensions, "built corpus");
        Ok(corpus)
    }

    /// Build a snapshot from documents and a precomputed embedding map.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Corpus`] unless both sides have exactly the same
    /// identifiers, and [`QaError::DimensionMismatch`] if the embeddings
    /// differ in length.
    pub fn from_parts(
        documents: Vec<Document>,
        mut embeddings: HashMap<String, Vec<f32>>,
    ) -> Result<Self> {
        let mut entries = Vec::with_capacity(documents.len());
        for document in documents {
            let embedding = embeddings.remove(&document.id).ok_or_else(|| {
                QaError::Corpus(format!("document '{}' has no embedding", document.id))
            })?;
            entries.push(CorpusEntry { document, embedding });
        }
        if let Some(orphan) = embeddings.keys().next() {
            return Err(QaError::Corpus(format!("embedding '{orphan}' has no document")));
        }
        Self::from_entries(entries)
    }

    /// Build a snapshot from document/embedding pairs.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Corpus`] on duplicate identifiers and
    /// [`QaError::DimensionMismatch`] if the embeddings differ in length.
    pub fn from_entries(entries: impl IntoIterator<Item = CorpusEntry>) -> Result<Self> {
        let entries: Vec<CorpusEntry> = entries.into_iter().collect();
        let dimensions = entries.first().map_or(0, |e| e.embedding.len());
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.embedding.len() != dimensions {
                return Err(QaError::DimensionMismatch {
                    left: dimensions,
                    right: entry.embedding.len(),
                });
            }
            if index.insert(entry.document.id.clone(), position).is_some() {
                return Err(QaError::Corpus(format!(
                    "duplicate document id '{}'",
                    entry.document.id
                )));
            }
        }
        Ok(Self { entries, index, dimensions })
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Look up a document by identifier.
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.index.get(id).map(|&i| &self.entries[i].document)
    }

    /// Look up a document embedding by identifier.
    pub fn embedding(&self, id: &str) -> Option<&[f32]> {
        self.index.get(id).map(|&i| self.entries[i].embedding.as_slice())
    }

    /// The shared embedding dimension, `0` for an empty corpus.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A source of raw documents.
pub trait CorpusLoader: Send + Sync {
    /// Load every document. Identifiers must be unique and stable.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::CorpusIo`] or [`QaError::Corpus`] when the source
    /// cannot be read.
    fn load_corpus(&self) -> Result<Vec<Document>>;
}

/// Loads `.txt` files from a single directory.
///
/// Subdirectories are not traversed. The document identifier is the file
/// name (`"a.txt"`), and documents are returned sorted by it.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
    extension: String,
}

impl DirectoryLoader {
    /// Create a loader for `.txt` files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), extension: "txt".to_string() }
    }

    /// Load files with a different extension (without the leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// The directory being loaded.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn io_error(path: &Path, source: std::io::Error) -> QaError {
        QaError::CorpusIo { path: path.to_path_buf(), source }
    }
}

impl CorpusLoader for DirectoryLoader {
    fn load_corpus(&self) -> Result<Vec<Document>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Self::io_error(&self.root, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Self::io_error(&self.root, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|s| s.to_str()) == Some(self.extension.as_str()) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let id = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| {
                    QaError::Corpus(format!("file name is not valid UTF-8: {}", path.display()))
                })?
                .to_string();
            let text = fs::read_to_string(&path).map_err(|e| Self::io_error(&path, e))?;
            debug!(doc.id = %id, chars = text.chars().count(), "loaded document");
            documents.push(Document { id, text });
        }

        info!(root = %self.root.display(), document_count = documents.len(), "loaded corpus");
        Ok(documents)
    }
}
