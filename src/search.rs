//! The search orchestrator.
//!
//! [`HybridSearchEngine`] wires one request through the pipeline:
//! candidate fetch (filters applied) -> lexical and semantic scoring in
//! parallel -> fusion -> ordering -> pagination.

pub mod config;
pub mod engine;
pub mod stats;
pub mod types;

pub use config::SearchConfig;
pub use engine::HybridSearchEngine;
pub use stats::EngineStats;
pub use types::{SearchHit, SearchRequest, SearchResultPage};
