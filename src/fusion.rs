//! Fusion of lexical and semantic scores into one ranked list.
//!
//! Two strategies are supported:
//!
//! - **Linear**: each signal is min-max normalized to `[0, 1]` and mixed as
//!   `alpha * lexical + (1 - alpha) * semantic`.
//! - **Reciprocal rank fusion**: each signal contributes `1 / (rrf_k + rank)`
//!   from its own ranking, so raw score magnitudes do not matter.
//!
//! When the semantic signal is unavailable the ranker falls back to linear
//! fusion with `alpha = 1.0` and flags the ranking as degraded.

pub mod bonus;
pub mod config;
pub mod normalize;
pub mod ranker;
pub mod types;

pub use bonus::{QualityBonus, QualityBonusConfig};
pub use config::{FusionConfig, FusionMode};
pub use normalize::min_max_normalize;
pub use ranker::{FusionRanker, assign_ranks, sort_by_fused_score};
pub use types::{FusedRanking, ScoredCandidate};
