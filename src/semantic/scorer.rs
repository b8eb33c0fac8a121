//! Query-to-item semantic scoring with caching and degradation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::catalog::CatalogItem;
use crate::embedding::{QueryEmbeddingCache, TextEmbedder};
use crate::semantic::similarity::batch_cosine_similarity;

/// Result of a semantic pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemanticOutcome {
    /// One entry per candidate; `None` where the item could not be scored.
    pub scores: Vec<(u64, Option<f32>)>,
    /// Set when the semantic signal could not be produced at all.
    pub unavailable: bool,
    /// Why the signal is unavailable.
    pub reason: Option<String>,
}

impl SemanticOutcome {
    /// An empty outcome that is not a failure (empty query, no candidates).
    pub fn skipped() -> Self {
        Self::default()
    }

    /// An empty outcome flagging the semantic signal as unavailable.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            scores: Vec::new(),
            unavailable: true,
            reason: Some(reason.into()),
        }
    }

    /// Number of candidates that received a score.
    pub fn scored_count(&self) -> usize {
        self.scores.iter().filter(|(_, s)| s.is_some()).count()
    }
}

/// Scores candidates by cosine similarity to the query embedding.
///
/// Never fails: any problem obtaining the query embedding, or a candidate
/// set with no embeddings at all, yields an unavailable outcome.
#[derive(Clone)]
pub struct SemanticScorer {
    embedder: Option<Arc<dyn TextEmbedder>>,
    cache: Arc<QueryEmbeddingCache>,
    timeout: Duration,
    min_similarity: Option<f32>,
}

impl SemanticScorer {
    /// Create a scorer; without an embedder every pass is unavailable.
    pub fn new(
        embedder: Option<Arc<dyn TextEmbedder>>,
        cache: Arc<QueryEmbeddingCache>,
        timeout: Duration,
    ) -> Self {
        Self {
            embedder,
            cache,
            timeout,
            min_similarity: None,
        }
    }

    /// Report similarities below `threshold` as unscored.
    pub fn with_min_similarity(mut self, threshold: Option<f32>) -> Self {
        self.min_similarity = threshold;
        self
    }

    /// Whether an embedder is configured.
    pub fn has_embedder(&self) -> bool {
        self.embedder.is_some()
    }

    /// The query embedding cache.
    pub fn cache(&self) -> &Arc<QueryEmbeddingCache> {
        &self.cache
    }

    /// Score `candidates` against `query`.
    pub async fn score(&self, query: &str, candidates: &[CatalogItem]) -> SemanticOutcome {
        if query.trim().is_empty() || candidates.is_empty() {
            return SemanticOutcome::skipped();
        }

        let Some(embedder) = &self.embedder else {
            return degraded("no embedder configured");
        };

        if !candidates.iter().any(CatalogItem::has_embedding) {
            return degraded("no candidate has an embedding");
        }

        let query_vector = match tokio::time::timeout(
            self.timeout,
            self.cache.get_or_embed(query, embedder.as_ref()),
        )
        .await
        {
            Ok(Ok(vector)) => vector,
            Ok(Err(e)) => return degraded(format!("embedding failed: {e}")),
            Err(_) => {
                return degraded(format!(
                    "embedding timed out after {}ms",
                    self.timeout.as_millis()
                ));
            }
        };

        if query_vector.is_empty() || query_vector.iter().all(|x| *x == 0.0) {
            return degraded("query embedding is empty");
        }

        let outcome = SemanticOutcome {
            scores: self.score_with_vector(&query_vector, candidates),
            unavailable: false,
            reason: None,
        };
        let scored = outcome.scored_count();
        if scored == 0 {
            return degraded("no candidate could be scored semantically");
        }
        debug!(candidates = candidates.len(), scored, "semantic pass complete");

        outcome
    }

    /// Score `candidates` against an already computed query vector.
    pub fn score_with_vector(
        &self,
        query_vector: &[f32],
        candidates: &[CatalogItem],
    ) -> Vec<(u64, Option<f32>)> {
        let vectors: Vec<Option<&[f32]>> = candidates
            .iter()
            .map(|item| item.embedding.as_deref())
            .collect();

        candidates
            .iter()
            .zip(batch_cosine_similarity(query_vector, &vectors))
            .map(|(item, score)| {
                let score = match (score, self.min_similarity) {
                    (Some(s), Some(min)) if s < min => None,
                    (score, _) => score,
                };
                (item.id, score)
            })
            .collect()
    }
}

impl std::fmt::Debug for SemanticScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScorer")
            .field("embedder", &self.embedder.as_ref().map(|e| e.name().to_string()))
            .field("timeout", &self.timeout)
            .field("min_similarity", &self.min_similarity)
            .finish()
    }
}

fn degraded(reason: impl Into<String>) -> SemanticOutcome {
    let outcome = SemanticOutcome::unavailable(reason);
    warn!(
        reason = outcome.reason.as_deref().unwrap_or_default(),
        "semantic scoring unavailable, falling back to lexical ranking"
    );
    outcome
}
