use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;

use gamerank::catalog::{CatalogItem, InMemoryCatalog};
use gamerank::error::GameRankError;
use gamerank::filter::SortBy;
use gamerank::fusion::FusionMode;
use gamerank::search::{HybridSearchEngine, SearchConfig, SearchRequest};

#[test]
fn test_load_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"{{
            "fusion": {{"alpha": 0.8, "mode": "reciprocal_rank_fusion", "rrf_k": 30}},
            "field_weights": {{"title": 3.0}},
            "default_page_limit": 5,
            "stop_words": true
        }}"#
    )?;

    let config = SearchConfig::from_json_file(file.path())?;
    assert_eq!(config.fusion.alpha, 0.8);
    assert_eq!(config.fusion.mode, FusionMode::ReciprocalRankFusion);
    assert_eq!(config.fusion.rrf_k, 30);
    assert_eq!(config.field_weights.title, 3.0);
    assert_eq!(config.field_weights.description, 1.0);
    assert_eq!(config.default_page_limit, 5);
    assert!(config.stop_words);
    assert_eq!(config.embedding_cache_capacity, 1000);
    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, r#"{{"fusion": {{"alpha": 2.0}}}}"#)?;

    let err = SearchConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, GameRankError::Config(_)));
    Ok(())
}

#[tokio::test]
async fn test_engine_uses_config_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, r#"{{"default_page_limit": 2, "fusion": {{"alpha": 0.9}}}}"#)?;
    let config = SearchConfig::from_json_file(file.path())?;

    let catalog = Arc::new(InMemoryCatalog::from_items(
        (1..=5).map(|id| CatalogItem::new(id, format!("Game {id}"))),
    ));
    let engine = HybridSearchEngine::new(catalog, None, config)?;

    let page = engine
        .search_request(&SearchRequest::new("").with_sort_by(SortBy::Name))
        .await?;
    assert_eq!(page.limit, 2);
    assert_eq!(page.total, 5);
    assert_eq!(page.item_ids(), vec![1, 2]);
    // An empty query never consults the embedder.
    assert!(!page.degraded);
    Ok(())
}
