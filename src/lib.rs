//! # gamerank
//!
//! Hybrid lexical and semantic ranking for game catalogs.
//!
//! ## Features
//!
//! - Field-weighted BM25 over titles and descriptions
//! - Cosine similarity against an injected embedding model
//! - Bounded, shared query embedding cache
//! - Linear and reciprocal rank fusion
//! - Graceful fallback to lexical-only ranking
//! - Structured filters, sort orders and pagination

pub mod analysis;
pub mod catalog;
pub mod embedding;
pub mod error;
pub mod filter;
pub mod fusion;
pub mod lexical;
pub mod logging;
pub mod search;
pub mod semantic;

pub mod prelude {
    pub use crate::catalog::{CatalogItem, CatalogStore, InMemoryCatalog};
    pub use crate::embedding::{FnEmbedder, TextEmbedder};
    pub use crate::error::{GameRankError, Result};
    pub use crate::filter::{SearchFilters, SortBy};
    pub use crate::fusion::{FusionConfig, FusionMode, ScoredCandidate};
    pub use crate::search::{HybridSearchEngine, SearchConfig, SearchRequest, SearchResultPage};
}

// Version information
/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
