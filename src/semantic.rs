//! Semantic relevance scoring.

pub mod scorer;
pub mod similarity;

pub use scorer::{SemanticOutcome, SemanticScorer};
pub use similarity::{PARALLEL_THRESHOLD, batch_cosine_similarity, cosine_similarity};
