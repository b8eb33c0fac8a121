//! The catalog collaborator contract.

use async_trait::async_trait;

use crate::catalog::item::CatalogItem;
use crate::error::Result;
use crate::filter::SearchFilters;

/// Read access to the catalog plus embedding write-back.
///
/// Implementations may sit on a database, a remote service or memory. Any
/// failure should be reported as [`GameRankError::Catalog`](crate::error::GameRankError::Catalog)
/// so callers can treat it as retryable.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch a single item by id.
    async fn fetch_by_id(&self, id: u64) -> Result<Option<CatalogItem>>;

    /// Fetch a batch of items; unknown ids are skipped.
    async fn fetch_batch(&self, ids: &[u64]) -> Result<Vec<CatalogItem>>;

    /// Fetch every item in the catalog, ordered by id.
    async fn fetch_all(&self) -> Result<Vec<CatalogItem>>;

    /// Fetch the items that satisfy `filters`, ordered by id.
    ///
    /// This is the pre-scoring filter boundary of the search pipeline.
    async fn fetch_candidates(&self, filters: &SearchFilters) -> Result<Vec<CatalogItem>>;

    /// Store a freshly computed embedding for an item.
    async fn update_embedding(&self, id: u64, embedding: Vec<f32>) -> Result<()>;
}
