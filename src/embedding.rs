//! Query and item embeddings.
//!
//! The embedding model itself is an injected [`TextEmbedder`]; this module
//! provides the trait, a closure adapter, the bounded query-embedding cache
//! and the batch indexer that fills in missing item embeddings.

pub mod cache;
pub mod function;
pub mod indexer;
pub mod text_embedder;

pub use cache::{CacheStats, DEFAULT_CACHE_CAPACITY, QueryEmbeddingCache};
pub use function::FnEmbedder;
pub use indexer::{EmbeddingIndexer, IndexReport};
pub use text_embedder::TextEmbedder;
