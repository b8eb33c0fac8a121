//! Lexical relevance scoring.
//!
//! BM25 statistics are rebuilt per request from the current candidate set, so
//! lexical scores are only comparable within a single request.

pub mod bm25;
pub mod scorer;

pub use bm25::{Bm25Config, Bm25Corpus};
pub use scorer::{FieldWeightedBm25Scorer, FieldWeights, LexicalScorer, score_lexical};
