//! Types produced by the fusion stage.

use serde::{Deserialize, Serialize};

use crate::fusion::config::FusionMode;

/// A scored candidate, created per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Catalog item id.
    pub item_id: u64,
    /// Raw BM25 score (0 = no lexical match).
    pub lexical_score: f32,
    /// Cosine similarity, `None` if the item was not scored semantically.
    pub semantic_score: Option<f32>,
    /// Final ranking key.
    pub fused_score: f32,
    /// 1-based position in the ranked list.
    pub rank: u32,
}

impl ScoredCandidate {
    /// Create an unranked candidate with no scores.
    pub fn new(item_id: u64) -> Self {
        Self {
            item_id,
            lexical_score: 0.0,
            semantic_score: None,
            fused_score: 0.0,
            rank: 0,
        }
    }

    /// Set the raw lexical score.
    pub fn with_lexical_score(mut self, score: f32) -> Self {
        self.lexical_score = score;
        self
    }

    /// Set the raw semantic score.
    pub fn with_semantic_score(mut self, score: f32) -> Self {
        self.semantic_score = Some(score);
        self
    }
}

/// Output of [`FusionRanker::fuse`](crate::fusion::FusionRanker::fuse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedRanking {
    /// Candidates sorted by fused score, ranks assigned 1..N.
    pub candidates: Vec<ScoredCandidate>,
    /// Whether the semantic signal was unavailable.
    pub degraded: bool,
    /// Mode actually applied.
    pub effective_mode: FusionMode,
    /// Alpha actually applied.
    pub effective_alpha: f32,
}

impl FusedRanking {
    /// Number of fused candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether no candidate was fused.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Item ids in ranked order.
    pub fn item_ids(&self) -> Vec<u64> {
        self.candidates.iter().map(|c| c.item_id).collect()
    }
}
