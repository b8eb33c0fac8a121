//! Cosine similarity.

use rayon::prelude::*;

/// Candidate count above which similarities are computed on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 100;

/// `dot(a, b) / (|a| * |b|)`, clamped to `[-1, 1]`.
///
/// `None` when the dimensions differ, either vector is empty, or either has
/// zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some((dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

/// Similarity of `query` to each vector; `None` entries stay `None`.
pub fn batch_cosine_similarity(query: &[f32], vectors: &[Option<&[f32]>]) -> Vec<Option<f32>> {
    if vectors.len() < PARALLEL_THRESHOLD {
        return vectors
            .iter()
            .map(|v| v.and_then(|v| cosine_similarity(query, v)))
            .collect();
    }

    vectors
        .par_iter()
        .map(|v| v.and_then(|v| cosine_similarity(query, v)))
        .collect()
}
