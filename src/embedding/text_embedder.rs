//! Text embedding trait.

use async_trait::async_trait;

use crate::error::Result;

/// Converts text to a dense vector.
///
/// Implementations wrap a local model, a remote inference service or, in
/// tests, a deterministic function. Every vector returned by one embedder
/// should have [`dimension`](TextEmbedder::dimension) entries.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use gamerank::embedding::TextEmbedder;
/// use gamerank::error::Result;
///
/// struct Constant;
///
/// #[async_trait]
/// impl TextEmbedder for Constant {
///     async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
///         Ok(vec![1.0, 0.0])
///     }
///
///     fn dimension(&self) -> usize {
///         2
///     }
/// }
/// ```
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Generate an embedding vector for the given text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    ///
    /// The default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Dimension of generated embeddings.
    fn dimension(&self) -> usize;

    /// Identifier used in logs.
    fn name(&self) -> &str {
        "unknown"
    }
}
