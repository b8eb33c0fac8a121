//! Batch embedding of catalog items.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{CatalogStore, embedding_text};
use crate::embedding::text_embedder::TextEmbedder;
use crate::error::Result;

/// How often indexing progress is logged, in items.
const PROGRESS_INTERVAL: usize = 100;

/// Outcome of an indexing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
    /// Items that received a new embedding.
    pub indexed: usize,
    /// Items that already had one.
    pub skipped: usize,
    /// Items the embedder failed on.
    pub failed: usize,
}

/// Fills in missing item embeddings through the injected embedder.
pub struct EmbeddingIndexer {
    catalog: Arc<dyn CatalogStore>,
    embedder: Arc<dyn TextEmbedder>,
}

impl EmbeddingIndexer {
    /// Create an indexer writing `embedder` output back to `catalog`.
    pub fn new(catalog: Arc<dyn CatalogStore>, embedder: Arc<dyn TextEmbedder>) -> Self {
        Self { catalog, embedder }
    }

    /// Embed every item lacking an embedding and write it back.
    ///
    /// Embedder failures, including empty vectors, are logged and counted per
    /// item. Catalog failures abort the run.
    pub async fn index_missing(&self) -> Result<IndexReport> {
        let items = self.catalog.fetch_all().await?;
        let total = items.len();
        let mut report = IndexReport::default();

        for (position, item) in items.iter().enumerate() {
            if item.has_embedding() {
                report.skipped += 1;
                continue;
            }

            match self.embedder.embed(&embedding_text(item)).await {
                Ok(embedding) if !embedding.is_empty() => {
                    self.catalog.update_embedding(item.id, embedding).await?;
                    report.indexed += 1;
                }
                Ok(_) => {
                    warn!(item_id = item.id, "embedder returned an empty vector");
                    report.failed += 1;
                }
                Err(e) => {
                    warn!(item_id = item.id, error = %e, "failed to embed item");
                    report.failed += 1;
                }
            }

            if (position + 1) % PROGRESS_INTERVAL == 0 {
                info!(processed = position + 1, total, "embedding progress");
            }
        }

        info!(
            indexed = report.indexed,
            skipped = report.skipped,
            failed = report.failed,
            embedder = self.embedder.name(),
            "embedding indexing finished"
        );
        Ok(report)
    }
}
