//! Engine configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::embedding::DEFAULT_CACHE_CAPACITY;
use crate::error::{GameRankError, Result};
use crate::filter::MAX_PAGE_LIMIT;
use crate::fusion::{FusionConfig, QualityBonusConfig};
use crate::lexical::{Bm25Config, FieldWeights};

/// Configuration for [`HybridSearchEngine`](crate::search::HybridSearchEngine).
///
/// Every field has a default, so a configuration file only needs the values
/// it overrides.
///
/// # Examples
///
/// ```
/// use gamerank::search::SearchConfig;
///
/// let config = SearchConfig::from_json_str(r#"{"fusion": {"alpha": 0.7}}"#).unwrap();
/// assert_eq!(config.fusion.alpha, 0.7);
/// assert_eq!(config.embedding_cache_capacity, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// BM25 parameters.
    pub bm25: Bm25Config,
    /// Title and description weights for the lexical score.
    pub field_weights: FieldWeights,
    /// Fusion parameters used by [`SearchRequest`](crate::search::SearchRequest)s
    /// that do not carry their own.
    pub fusion: FusionConfig,
    /// Capacity of the query embedding cache.
    pub embedding_cache_capacity: usize,
    /// Deadline for obtaining the query embedding.
    pub semantic_timeout_ms: u64,
    /// Upper bound on the page size.
    pub max_page_limit: u32,
    /// Page size when a request does not specify one.
    pub default_page_limit: u32,
    /// Similarities below this are treated as unscored.
    pub min_similarity: Option<f32>,
    /// Score the whole catalog semantically and re-apply filters after fusion.
    pub broaden_semantic_candidates: bool,
    /// Drop English stop words during analysis.
    pub stop_words: bool,
    /// Custom token regex, replacing the default `[a-z0-9]` splitter.
    pub token_pattern: Option<String>,
    /// Optional post-fusion quality adjustment.
    pub quality_bonus: QualityBonusConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bm25: Bm25Config::default(),
            field_weights: FieldWeights::default(),
            fusion: FusionConfig::default(),
            embedding_cache_capacity: DEFAULT_CACHE_CAPACITY,
            semantic_timeout_ms: 2000,
            max_page_limit: MAX_PAGE_LIMIT,
            default_page_limit: 20,
            min_similarity: None,
            broaden_semantic_candidates: false,
            stop_words: false,
            token_pattern: None,
            quality_bonus: QualityBonusConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Semantic timeout as a [`Duration`].
    pub fn semantic_timeout(&self) -> Duration {
        Duration::from_millis(self.semantic_timeout_ms)
    }

    /// Reject out-of-range values before the engine is built.
    pub fn validate(&self) -> Result<()> {
        self.fusion.validate()?;

        if !(self.bm25.k1.is_finite() && self.bm25.k1 >= 0.0) {
            return Err(GameRankError::config(format!(
                "bm25.k1 must be >= 0, got {}",
                self.bm25.k1
            )));
        }
        if !(0.0..=1.0).contains(&self.bm25.b) {
            return Err(GameRankError::config(format!(
                "bm25.b must be within [0, 1], got {}",
                self.bm25.b
            )));
        }
        for (field, weight) in [
            ("title", self.field_weights.title),
            ("description", self.field_weights.description),
        ] {
            if !(weight.is_finite() && weight > 0.0) {
                return Err(GameRankError::config(format!(
                    "field weight for {field} must be > 0, got {weight}"
                )));
            }
        }
        if self.embedding_cache_capacity == 0 {
            return Err(GameRankError::config(
                "embedding_cache_capacity must be greater than 0",
            ));
        }
        if self.semantic_timeout_ms == 0 {
            return Err(GameRankError::config(
                "semantic_timeout_ms must be greater than 0",
            ));
        }
        if self.max_page_limit == 0 {
            return Err(GameRankError::config("max_page_limit must be greater than 0"));
        }
        if let Some(min) = self.min_similarity
            && !(-1.0..=1.0).contains(&min)
        {
            return Err(GameRankError::config(format!(
                "min_similarity must be within [-1, 1], got {min}"
            )));
        }
        Ok(())
    }
}
