//! Vector math for embedding comparison.

use crate::error::{QaError, Result};

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
///
/// # Errors
///
/// Returns [`QaError::DimensionMismatch`] when the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(QaError::DimensionMismatch { left: a.len(), right: b.len() });
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}
