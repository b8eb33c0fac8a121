//! Fusion configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GameRankError, Result};

/// Strategy used to merge the lexical and semantic signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionMode {
    /// Weighted sum of min-max normalized scores.
    #[default]
    Linear,
    /// Weighted sum of reciprocal ranks.
    #[serde(alias = "rrf")]
    ReciprocalRankFusion,
}

/// Per-request fusion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Weight toward the lexical signal (1.0 = pure lexical, 0.0 = pure semantic).
    pub alpha: f32,
    /// Fusion strategy.
    pub mode: FusionMode,
    /// RRF smoothing constant; only used in [`FusionMode::ReciprocalRankFusion`].
    pub rrf_k: u32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            mode: FusionMode::Linear,
            rrf_k: 60,
        }
    }
}

impl FusionConfig {
    /// Linear fusion with the given alpha.
    pub fn linear(alpha: f32) -> Self {
        Self {
            alpha,
            mode: FusionMode::Linear,
            ..Default::default()
        }
    }

    /// Reciprocal rank fusion with the given alpha and the default `rrf_k`.
    pub fn rrf(alpha: f32) -> Self {
        Self {
            alpha,
            mode: FusionMode::ReciprocalRankFusion,
            ..Default::default()
        }
    }

    /// Override the RRF smoothing constant.
    pub fn with_rrf_k(mut self, rrf_k: u32) -> Self {
        self.rrf_k = rrf_k;
        self
    }

    /// Check that `alpha` lies in `[0, 1]` and `rrf_k` is positive.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(GameRankError::config(format!(
                "fusion alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        if self.rrf_k == 0 {
            return Err(GameRankError::config("rrf_k must be greater than 0"));
        }
        Ok(())
    }
}
