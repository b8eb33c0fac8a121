//! Request and response types.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::filter::{SearchFilters, SortBy};
use crate::fusion::{FusionConfig, FusionMode, ScoredCandidate};

/// A search request as received from the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Free-text query; may be empty.
    pub query: String,
    /// Hard filters.
    pub filters: SearchFilters,
    /// Fusion parameters; the engine's configured defaults when absent.
    pub fusion: Option<FusionConfig>,
    /// Result ordering.
    pub sort_by: SortBy,
    /// Number of ranked results to skip.
    pub offset: u32,
    /// Page size; the engine's default page size when absent.
    pub limit: Option<u32>,
}

impl SearchRequest {
    /// Create a request for `query` with default parameters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the hard filters.
    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Override the configured fusion parameters.
    pub fn with_fusion(mut self, fusion: FusionConfig) -> Self {
        self.fusion = Some(fusion);
        self
    }

    /// Set the result ordering.
    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Set the page window.
    pub fn with_page(mut self, offset: u32, limit: u32) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }
}

/// One result: the scores plus the catalog item they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub score: ScoredCandidate,
    #[serde(flatten)]
    pub item: CatalogItem,
}

/// One page of ranked results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    /// Results on this page, in rank order.
    pub results: Vec<SearchHit>,
    /// Fused, filtered candidates before pagination.
    pub total: u32,
    /// Set when the semantic signal was unavailable and ranking is lexical only.
    pub degraded: bool,
    /// Why the semantic signal was unavailable; `None` unless `degraded`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
    pub offset: u32,
    /// Page size after clamping.
    pub limit: u32,
    pub query: String,
    /// Fusion mode actually applied.
    pub mode: FusionMode,
    /// Alpha actually applied.
    pub alpha: f32,
    pub sort_by: SortBy,
    /// Filters the page was produced under.
    pub filters: SearchFilters,
    /// Wall time spent on the request.
    pub query_time_ms: u64,
}

impl SearchResultPage {
    /// Number of results on this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether this page has no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Item ids on this page, in rank order.
    pub fn item_ids(&self) -> Vec<u64> {
        self.results.iter().map(|hit| hit.item.id).collect()
    }

    /// Whether another page follows this one.
    pub fn has_more(&self) -> bool {
        u64::from(self.offset) + (self.results.len() as u64) < u64::from(self.total)
    }
}
