//! Engine statistics.

use serde::{Deserialize, Serialize};

use crate::embedding::CacheStats;

/// Snapshot of engine state for health and monitoring endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Items in the catalog.
    pub catalog_items: usize,
    /// Items carrying an embedding.
    pub embedded_items: usize,
    /// Query embedding cache counters.
    pub cache: CacheStats,
    /// Name of the configured embedder, if any.
    pub embedder: Option<String>,
}

impl EngineStats {
    /// Fraction of the catalog indexed for semantic search.
    pub fn embedding_coverage(&self) -> f64 {
        if self.catalog_items == 0 {
            0.0
        } else {
            self.embedded_items as f64 / self.catalog_items as f64
        }
    }
}
