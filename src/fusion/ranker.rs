//! The fusion ranker.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::fusion::config::{FusionConfig, FusionMode};
use crate::fusion::normalize::min_max_normalize;
use crate::fusion::types::{FusedRanking, ScoredCandidate};

/// Merges a lexical and a semantic score list into one ranked list.
#[derive(Debug, Clone, Default)]
pub struct FusionRanker {
    config: FusionConfig,
}

impl FusionRanker {
    /// Create a new ranker for the given fusion parameters.
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    /// The configured fusion parameters.
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Fuse `lexical` and `semantic` into a ranked list.
    ///
    /// The candidate pool is the union of ids across both lists. Semantic
    /// entries holding `None` count as absent from the semantic signal. When
    /// `semantic_unavailable` is set the semantic list is ignored and linear
    /// fusion with `alpha = 1.0` is applied instead of the configured mode.
    pub fn fuse(
        &self,
        lexical: Vec<(u64, f32)>,
        semantic: Vec<(u64, Option<f32>)>,
        semantic_unavailable: bool,
    ) -> FusedRanking {
        let (mode, alpha) = if semantic_unavailable {
            (FusionMode::Linear, 1.0)
        } else {
            (self.config.mode, self.config.alpha)
        };

        let lexical: BTreeMap<u64, f32> = lexical.into_iter().collect();
        let mut pool: BTreeSet<u64> = lexical.keys().copied().collect();
        let mut semantic_scores: BTreeMap<u64, f32> = BTreeMap::new();
        if !semantic_unavailable {
            for (item_id, score) in semantic {
                pool.insert(item_id);
                if let Some(score) = score {
                    semantic_scores.insert(item_id, score);
                }
            }
        }

        let (lexical_part, semantic_part) = match mode {
            FusionMode::Linear => (normalized(&lexical), normalized(&semantic_scores)),
            FusionMode::ReciprocalRankFusion => (
                reciprocal_ranks(&lexical, self.config.rrf_k),
                reciprocal_ranks(&semantic_scores, self.config.rrf_k),
            ),
        };

        let mut candidates: Vec<ScoredCandidate> = pool
            .into_iter()
            .map(|item_id| {
                let lexical_component = lexical_part.get(&item_id).copied().unwrap_or(0.0);
                let semantic_component = semantic_part.get(&item_id).copied().unwrap_or(0.0);
                ScoredCandidate {
                    item_id,
                    lexical_score: lexical.get(&item_id).copied().unwrap_or(0.0),
                    semantic_score: semantic_scores.get(&item_id).copied(),
                    fused_score: alpha * lexical_component + (1.0 - alpha) * semantic_component,
                    rank: 0,
                }
            })
            .collect();

        sort_by_fused_score(&mut candidates);
        assign_ranks(&mut candidates);

        debug!(
            candidates = candidates.len(),
            semantic_scored = semantic_scores.len(),
            ?mode,
            alpha,
            degraded = semantic_unavailable,
            "fused ranking"
        );

        FusedRanking {
            candidates,
            degraded: semantic_unavailable,
            effective_mode: mode,
            effective_alpha: alpha,
        }
    }
}

/// Sort by fused score descending, ties broken by ascending item id.
pub fn sort_by_fused_score(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| {
        b.fused_score
            .total_cmp(&a.fused_score)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
}

/// Assign contiguous 1-based ranks in list order.
pub fn assign_ranks(candidates: &mut [ScoredCandidate]) {
    for (position, candidate) in candidates.iter_mut().enumerate() {
        candidate.rank = u32::try_from(position + 1).unwrap_or(u32::MAX);
    }
}

fn normalized(scores: &BTreeMap<u64, f32>) -> BTreeMap<u64, f32> {
    let values: Vec<f32> = scores.values().copied().collect();
    scores
        .keys()
        .copied()
        .zip(min_max_normalize(&values))
        .collect()
}

/// `1 / (k + rank)` per item, ranking by raw score descending then id.
fn reciprocal_ranks(scores: &BTreeMap<u64, f32>, k: u32) -> BTreeMap<u64, f32> {
    let mut ranked: Vec<(u64, f32)> = scores.iter().map(|(&id, &s)| (id, s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .enumerate()
        .map(|(position, (item_id, _))| {
            let rank = position as f32 + 1.0;
            (item_id, 1.0 / (k as f32 + rank))
        })
        .collect()
}
