//! Bounded LRU cache of query embeddings.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedding::text_embedder::TextEmbedder;
use crate::error::{GameRankError, Result};

/// Default number of cached query embeddings.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Cache statistics for monitoring and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries currently cached.
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Query embeddings keyed by the exact query string.
///
/// Shared by all in-flight requests. The lock is never held across the
/// embedder call, so a slow or abandoned embedding does not block other
/// requests and leaves the cache untouched.
pub struct QueryEmbeddingCache {
    entries: Mutex<LruCache<String, Arc<Vec<f32>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QueryEmbeddingCache {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| GameRankError::config("embedding cache capacity must be > 0"))?;
        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Look up a cached embedding, recording a hit or miss.
    pub fn get(&self, query: &str) -> Option<Arc<Vec<f32>>> {
        let found = self.entries.lock().get(query).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Store an embedding, evicting the least recently used entry if full.
    pub fn insert(&self, query: &str, embedding: Arc<Vec<f32>>) {
        self.entries.lock().put(query.to_string(), embedding);
    }

    /// Return the cached embedding for `query`, embedding and caching it on a
    /// miss. Embedder errors are returned and nothing is cached.
    pub async fn get_or_embed(
        &self,
        query: &str,
        embedder: &dyn TextEmbedder,
    ) -> Result<Arc<Vec<f32>>> {
        if let Some(embedding) = self.get(query) {
            debug!(query, "query embedding cache hit");
            return Ok(embedding);
        }
        debug!(query, embedder = embedder.name(), "query embedding cache miss");

        let embedding = Arc::new(embedder.embed(query).await?);
        self.insert(query, Arc::clone(&embedding));
        Ok(embedding)
    }

    /// Number of cached embeddings.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no embeddings.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Maximum number of cached embeddings.
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    /// Current statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: entries.len(),
            capacity: entries.cap().get(),
        }
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl Default for QueryEmbeddingCache {
    fn default() -> Self {
        Self {
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            )),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl std::fmt::Debug for QueryEmbeddingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEmbeddingCache")
            .field("stats", &self.stats())
            .finish()
    }
}
