//! Catalog items and the catalog collaborator contract.
//!
//! The ranking engine never owns catalog data. It reads items through the
//! [`CatalogStore`] trait and only ever writes back embeddings produced by the
//! [`EmbeddingIndexer`](crate::embedding::EmbeddingIndexer).

pub mod item;
pub mod memory;
pub mod store;

pub use item::{CatalogItem, embedding_text};
pub use memory::InMemoryCatalog;
pub use store::CatalogStore;
