//! Closure-backed embedder.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::embedding::text_embedder::TextEmbedder;
use crate::error::{GameRankError, Result};

type EmbedFn = dyn Fn(&str) -> Result<Vec<f32>> + Send + Sync;

/// A [`TextEmbedder`] backed by a synchronous function.
///
/// The function runs on tokio's blocking pool, so CPU-bound model inference
/// does not stall the async runtime.
#[derive(Clone)]
pub struct FnEmbedder {
    name: String,
    dimension: usize,
    func: Arc<EmbedFn>,
}

impl FnEmbedder {
    /// Wrap a synchronous embedding function producing `dimension`-sized vectors.
    pub fn new<F>(dimension: usize, func: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<f32>> + Send + Sync + 'static,
    {
        Self {
            name: "fn".to_string(),
            dimension,
            func: Arc::new(func),
        }
    }

    /// Set the name reported in logs and stats.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl fmt::Debug for FnEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEmbedder")
            .field("name", &self.name)
            .field("dimension", &self.dimension)
            .finish()
    }
}

#[async_trait]
impl TextEmbedder for FnEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let func = Arc::clone(&self.func);
        let text = text.to_string();
        tokio::task::spawn_blocking(move || func(&text))
            .await
            .map_err(|e| GameRankError::embedding(format!("Embedding task failed: {e}")))?
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fn_embedder() {
        let embedder = FnEmbedder::new(2, |text| Ok(vec![text.len() as f32, 1.0])).with_name("len");
        assert_eq!(embedder.embed("abc").await.unwrap(), vec![3.0, 1.0]);
        assert_eq!(embedder.dimension(), 2);
        assert_eq!(embedder.name(), "len");
    }

    #[tokio::test]
    async fn test_fn_embedder_error() {
        let embedder = FnEmbedder::new(2, |_| Err(GameRankError::embedding("model not loaded")));
        let err = embedder.embed("abc").await.unwrap_err();
        assert!(matches!(err, GameRankError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_embed_batch_default() {
        let embedder = FnEmbedder::new(1, |text| Ok(vec![text.len() as f32]));
        let vectors = embedder.embed_batch(&["a", "bb"]).await.unwrap();
        assert_eq!(vectors, vec![vec![1.0], vec![2.0]]);
    }
}
