//! Score normalization.

/// Min-max normalize `scores` to `[0, 1]`.
///
/// Every entry becomes `1.0` when all scores are equal; an empty input stays
/// empty.
pub fn min_max_normalize(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return Vec::new();
    }

    let (min, max) = scores
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &s| {
            (min.min(s), max.max(s))
        });

    let range = max - min;
    if range == 0.0 || !range.is_finite() {
        return vec![1.0; scores.len()];
    }

    scores.iter().map(|&s| (s - min) / range).collect()
}
