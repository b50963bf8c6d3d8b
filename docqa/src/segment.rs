//! Sentence segmentation strategies.
//!
//! This module provides the [`Segmenter`] trait used by the context assembler
//! to break documents into sentence units, and [`DelimiterSegmenter`], which
//! splits on a literal delimiter (`". "` by default).

/// A strategy for splitting text into sentence units.
pub trait Segmenter: Send + Sync {
    /// Split text into units, in document order.
    ///
    /// Returns an empty `Vec` for blank text. Returned units are never blank.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Splits text on a literal delimiter.
///
/// This approximates sentence boundaries: abbreviations such as `"e.g. "`
/// split too. The fragment after the last delimiter is kept even when it has
/// no delimiter of its own, and blank fragments are dropped.
///
/// # Example
///
/// ```rust
/// use docqa::{DelimiterSegmenter, Segmenter};
///
/// let segmenter = DelimiterSegmenter::default();
/// assert_eq!(segmenter.segment("One. Two. Three."), vec!["One", "Two", "Three."]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterSegmenter {
    delimiter: String,
}

impl DelimiterSegmenter {
    /// The delimiter used by [`DelimiterSegmenter::default`].
    pub const DEFAULT_DELIMITER: &'static str = ". ";

    /// Create a segmenter splitting on `delimiter`.
    ///
    /// An empty delimiter yields the whole text as a single unit.
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self { delimiter: delimiter.into() }
    }

    /// The delimiter this segmenter splits on.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl Default for DelimiterSegmenter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELIMITER)
    }
}

impl Segmenter for DelimiterSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if self.delimiter.is_empty() {
            return if text.trim().is_empty() { Vec::new() } else { vec![text] };
        }
        text.split(self.delimiter.as_str()).filter(|unit| !unit.trim().is_empty()).collect()
    }
}
