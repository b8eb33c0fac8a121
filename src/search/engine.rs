//! Hybrid search engine.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::analysis::Analyzer;
use crate::catalog::{CatalogItem, CatalogStore};
use crate::embedding::{EmbeddingIndexer, QueryEmbeddingCache, TextEmbedder};
use crate::error::{GameRankError, Result};
use crate::filter::{self, SearchFilters, SortBy, paginate_with_max, sort_candidates};
use crate::fusion::{FusionConfig, FusionRanker, QualityBonus};
use crate::lexical::{FieldWeightedBm25Scorer, LexicalScorer};
use crate::search::config::SearchConfig;
use crate::search::stats::EngineStats;
use crate::search::types::{SearchHit, SearchRequest, SearchResultPage};
use crate::semantic::{SemanticOutcome, SemanticScorer};

/// Long-lived search service, constructed once and shared across requests.
///
/// The only state shared between requests is the query embedding cache.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use gamerank::catalog::{CatalogItem, InMemoryCatalog};
/// use gamerank::filter::SearchFilters;
/// use gamerank::fusion::FusionConfig;
/// use gamerank::search::{HybridSearchEngine, SearchConfig};
///
/// # #[tokio::main]
/// # async fn main() {
/// let catalog = Arc::new(InMemoryCatalog::from_items([
///     CatalogItem::new(1, "Portal").with_description("A puzzle game"),
///     CatalogItem::new(2, "Doom").with_description("A shooter"),
/// ]));
/// let engine = HybridSearchEngine::new(catalog, None, SearchConfig::default()).unwrap();
///
/// let page = engine
///     .search("puzzle", &SearchFilters::default(), &FusionConfig::default(), 0, 10)
///     .await
///     .unwrap();
/// assert_eq!(page.item_ids()[0], 1);
/// assert!(page.degraded);
/// # }
/// ```
pub struct HybridSearchEngine {
    catalog: Arc<dyn CatalogStore>,
    embedder: Option<Arc<dyn TextEmbedder>>,
    analyzer: Analyzer,
    lexical: Arc<dyn LexicalScorer>,
    semantic: SemanticScorer,
    bonus: QualityBonus,
    config: SearchConfig,
}

impl HybridSearchEngine {
    /// Create an engine over `catalog`. Without an embedder every search runs
    /// in degraded, lexical-only mode.
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        embedder: Option<Arc<dyn TextEmbedder>>,
        config: SearchConfig,
    ) -> Result<Self> {
        config.validate()?;

        let analyzer = Analyzer::from_options(config.token_pattern.as_deref(), config.stop_words)?;
        let lexical: Arc<dyn LexicalScorer> = Arc::new(FieldWeightedBm25Scorer::new(
            analyzer.clone(),
            config.bm25,
            config.field_weights,
        ));
        let cache = Arc::new(QueryEmbeddingCache::new(config.embedding_cache_capacity)?);
        let semantic = SemanticScorer::new(embedder.clone(), cache, config.semantic_timeout())
            .with_min_similarity(config.min_similarity);
        let bonus = QualityBonus::new(config.quality_bonus.clone());

        Ok(Self {
            catalog,
            embedder,
            analyzer,
            lexical,
            semantic,
            bonus,
            config,
        })
    }

    /// Replace the lexical scorer.
    pub fn with_lexical_scorer(mut self, scorer: Arc<dyn LexicalScorer>) -> Self {
        self.lexical = scorer;
        self
    }

    /// The engine configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The shared query embedding cache.
    pub fn cache(&self) -> &QueryEmbeddingCache {
        self.semantic.cache()
    }

    /// An indexer writing embeddings back to this engine's catalog, if an
    /// embedder is configured.
    pub fn indexer(&self) -> Option<EmbeddingIndexer> {
        self.embedder
            .as_ref()
            .map(|embedder| EmbeddingIndexer::new(Arc::clone(&self.catalog), Arc::clone(embedder)))
    }

    /// Rank the catalog against `query` under `filters` and return one page,
    /// ordered by relevance.
    ///
    /// Catalog failures are returned unchanged. Embedding failures never fail
    /// the request; they set `degraded` on the page instead.
    pub async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        fusion: &FusionConfig,
        offset: u32,
        limit: u32,
    ) -> Result<SearchResultPage> {
        self.execute(query, filters, fusion, SortBy::Relevance, offset, limit)
            .await
    }

    /// Run a [`SearchRequest`], filling unset parameters from the config.
    pub async fn search_request(&self, request: &SearchRequest) -> Result<SearchResultPage> {
        let fusion = request.fusion.unwrap_or(self.config.fusion);
        let limit = request.limit.unwrap_or(self.config.default_page_limit);
        self.execute(
            &request.query,
            &request.filters,
            &fusion,
            request.sort_by,
            request.offset,
            limit,
        )
        .await
    }

    /// Catalog and cache statistics.
    pub async fn stats(&self) -> Result<EngineStats> {
        let items = self.catalog.fetch_all().await?;
        Ok(EngineStats {
            catalog_items: items.len(),
            embedded_items: items.iter().filter(|item| item.has_embedding()).count(),
            cache: self.cache().stats(),
            embedder: self.embedder.as_ref().map(|e| e.name().to_string()),
        })
    }

    async fn execute(
        &self,
        query: &str,
        filters: &SearchFilters,
        fusion: &FusionConfig,
        sort_by: SortBy,
        offset: u32,
        limit: u32,
    ) -> Result<SearchResultPage> {
        let start = Instant::now();
        filters.validate()?;
        fusion.validate()?;

        debug!(query, ?filters, ?fusion, ?sort_by, offset, limit, "search request");

        let candidates = Arc::new(self.catalog.fetch_candidates(filters).await?);
        let query_tokens = self.analyzer.analyze(query);

        let broaden = self.config.broaden_semantic_candidates
            && !query_tokens.is_empty()
            && self.semantic.has_embedder();
        let semantic_pool = if broaden {
            Arc::new(self.catalog.fetch_all().await?)
        } else {
            Arc::clone(&candidates)
        };

        let lexical_task = {
            let scorer = Arc::clone(&self.lexical);
            let candidates = Arc::clone(&candidates);
            let tokens = query_tokens.clone();
            tokio::task::spawn_blocking(move || scorer.score(&tokens, &candidates))
        };
        let semantic_task = async {
            if query_tokens.is_empty() {
                SemanticOutcome::skipped()
            } else {
                self.semantic.score(query, &semantic_pool).await
            }
        };

        let (lexical, semantic) = tokio::join!(lexical_task, semantic_task);
        let lexical = lexical
            .map_err(|e| GameRankError::other(format!("Lexical scoring task failed: {e}")))?;

        let SemanticOutcome {
            scores: semantic_scores,
            unavailable,
            reason,
        } = semantic;
        let fused = FusionRanker::new(*fusion).fuse(lexical, semantic_scores, unavailable);
        let degraded_reason = if fused.degraded { reason } else { None };

        let items: HashMap<u64, CatalogItem> = semantic_pool
            .iter()
            .chain(candidates.iter())
            .map(|item| (item.id, item.clone()))
            .collect();

        let mut ranked = fused.candidates;
        if broaden {
            ranked.retain(|c| {
                items
                    .get(&c.item_id)
                    .is_some_and(|item| filter::apply(item, filters))
            });
        }
        self.bonus.apply(&mut ranked, &items);
        sort_candidates(&mut ranked, &items, sort_by);

        let limit = limit.min(self.config.max_page_limit);
        let (page, total) = paginate_with_max(&ranked, offset, limit, self.config.max_page_limit);
        let results: Vec<SearchHit> = page
            .iter()
            .filter_map(|candidate| {
                items.get(&candidate.item_id).map(|item| SearchHit {
                    score: candidate.clone(),
                    item: item.clone(),
                })
            })
            .collect();

        let query_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            total,
            returned = results.len(),
            degraded = fused.degraded,
            query_time_ms,
            "search complete"
        );

        Ok(SearchResultPage {
            results,
            total,
            degraded: fused.degraded,
            degraded_reason,
            offset,
            limit,
            query: query.to_string(),
            mode: fused.effective_mode,
            alpha: fused.effective_alpha,
            sort_by,
            filters: filters.clone(),
            query_time_ms,
        })
    }
}

impl std::fmt::Debug for HybridSearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridSearchEngine")
            .field("lexical", &self.lexical)
            .field("semantic", &self.semantic)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::embedding::FnEmbedder;
    use crate::fusion::FusionMode;
    use async_trait::async_trait;

    struct FailingCatalog;

    #[async_trait]
    impl CatalogStore for FailingCatalog {
        async fn fetch_by_id(&self, _id: u64) -> Result<Option<CatalogItem>> {
            Err(GameRankError::catalog("unreachable"))
        }

        async fn fetch_batch(&self, _ids: &[u64]) -> Result<Vec<CatalogItem>> {
            Err(GameRankError::catalog("unreachable"))
        }

        async fn fetch_all(&self) -> Result<Vec<CatalogItem>> {
            Err(GameRankError::catalog("unreachable"))
        }

        async fn fetch_candidates(&self, _filters: &SearchFilters) -> Result<Vec<CatalogItem>> {
            Err(GameRankError::catalog("unreachable"))
        }

        async fn update_embedding(&self, _id: u64, _embedding: Vec<f32>) -> Result<()> {
            Err(GameRankError::catalog("unreachable"))
        }
    }

    fn catalog() -> Arc<InMemoryCatalog> {
        Arc::new(InMemoryCatalog::from_items([
            CatalogItem::new(1, "Space Trader")
                .with_description("Trade goods between stars")
                .with_genres(["Strategy"])
                .with_price_cents(999)
                .with_embedding(vec![1.0, 0.0]),
            CatalogItem::new(2, "Farm Life")
                .with_description("Grow crops in space")
                .with_genres(["Simulation"])
                .with_price_cents(0)
                .with_embedding(vec![0.0, 1.0]),
            CatalogItem::new(3, "Star Fleet")
                .with_description("Command a fleet of ships")
                .with_genres(["Strategy"])
                .with_price_cents(1999)
                .with_embedding(vec![0.8, 0.2]),
        ]))
    }

    fn embedder() -> Arc<dyn TextEmbedder> {
        Arc::new(FnEmbedder::new(2, |text| {
            Ok(if text.contains("space") {
                vec![1.0, 0.0]
            } else {
                vec![0.0, 1.0]
            })
        }))
    }

    #[tokio::test]
    async fn test_hybrid_search() {
        let engine =
            HybridSearchEngine::new(catalog(), Some(embedder()), SearchConfig::default()).unwrap();
        let page = engine
            .search("space", &SearchFilters::default(), &FusionConfig::linear(0.5), 0, 10)
            .await
            .unwrap();

        assert!(!page.degraded);
        assert_eq!(page.total, 3);
        assert_eq!(page.item_ids()[0], 1);
        assert_eq!(page.mode, FusionMode::Linear);
        let ranks: Vec<u32> = page.results.iter().map(|h| h.score.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_filters_are_applied_before_scoring() {
        let engine =
            HybridSearchEngine::new(catalog(), Some(embedder()), SearchConfig::default()).unwrap();
        let filters = SearchFilters::new().with_genres(["Strategy"]);
        let page = engine
            .search("space", &filters, &FusionConfig::default(), 0, 10)
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(!page.item_ids().contains(&2));
    }

    #[tokio::test]
    async fn test_invalid_filters_rejected() {
        let engine = HybridSearchEngine::new(catalog(), None, SearchConfig::default()).unwrap();
        let filters = SearchFilters::new()
            .with_price_min_cents(500)
            .with_price_max_cents(100);
        let err = engine
            .search("space", &filters, &FusionConfig::default(), 0, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, GameRankError::InvalidFilter(_)));
    }

    #[tokio::test]
    async fn test_catalog_failure_propagates() {
        let engine =
            HybridSearchEngine::new(Arc::new(FailingCatalog), None, SearchConfig::default())
                .unwrap();
        let err = engine
            .search("space", &SearchFilters::default(), &FusionConfig::default(), 0, 10)
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, GameRankError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_broadened_candidates_are_refiltered() {
        let config = SearchConfig {
            broaden_semantic_candidates: true,
            ..Default::default()
        };
        let engine = HybridSearchEngine::new(catalog(), Some(embedder()), config).unwrap();
        let filters = SearchFilters::new().with_genres(["Strategy"]);
        let page = engine
            .search("grow crops", &filters, &FusionConfig::linear(0.0), 0, 10)
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(!page.item_ids().contains(&2));
        let ranks: Vec<u32> = page.results.iter().map(|h| h.score.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_sort_by_price() {
        let engine =
            HybridSearchEngine::new(catalog(), Some(embedder()), SearchConfig::default()).unwrap();
        let request = SearchRequest::new("space").with_sort_by(SortBy::PriceAsc);
        let page = engine.search_request(&request).await.unwrap();
        assert_eq!(page.item_ids(), vec![2, 1, 3]);
        assert_eq!(page.sort_by, SortBy::PriceAsc);
        assert_eq!(page.limit, 20);
    }

    #[tokio::test]
    async fn test_quality_bonus() {
        let mut config = SearchConfig::default();
        config.quality_bonus.enabled = true;
        config.quality_bonus.free_bonus = 10.0;
        let engine = HybridSearchEngine::new(catalog(), None, config).unwrap();
        let page = engine
            .search("fleet", &SearchFilters::default(), &FusionConfig::default(), 0, 10)
            .await
            .unwrap();
        assert_eq!(page.item_ids()[0], 2);
        assert_eq!(page.results[0].score.rank, 1);
    }

    #[tokio::test]
    async fn test_stats_and_indexer() {
        let catalog = Arc::new(InMemoryCatalog::from_items([
            CatalogItem::new(1, "Indexed").with_embedding(vec![1.0, 0.0]),
            CatalogItem::new(2, "Pending"),
        ]));
        let engine =
            HybridSearchEngine::new(catalog, Some(embedder()), SearchConfig::default()).unwrap();

        let stats = engine.stats().await.unwrap();
        assert_eq!(stats.catalog_items, 2);
        assert_eq!(stats.embedded_items, 1);
        assert_eq!(stats.embedder.as_deref(), Some("fn"));

        let report = engine.indexer().unwrap().index_missing().await.unwrap();
        assert_eq!(report.indexed, 1);
        assert_eq!(engine.stats().await.unwrap().embedded_items, 2);
    }

    #[tokio::test]
    async fn test_no_embedder_has_no_indexer() {
        let engine = HybridSearchEngine::new(catalog(), None, SearchConfig::default()).unwrap();
        assert!(engine.indexer().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SearchConfig {
            token_pattern: Some("(".to_string()),
            ..Default::default()
        };
        assert!(HybridSearchEngine::new(catalog(), None, config).is_err());
    }
}
