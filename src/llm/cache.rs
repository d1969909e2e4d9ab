
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::augmenter::{AugmentationError, QueryAugmenter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Classify,
    Expand,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::Expand => "expand",
        }
    }
}

#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}


/// Remembers successful augmentation replies for `ttl`; failures are never cached.
pub struct CachedAugmenter {
    inner: Arc<dyn QueryAugmenter>,
    cache: Mutex<LruCache<String, (String, Instant)>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedAugmenter {
    pub fn new(inner: Arc<dyn QueryAugmenter>, capacity: NonZeroUsize, ttl_secs: u64) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            ttl: Duration::from_secs(ttl_secs),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn make_key(operation: Operation, query: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(operation.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(query.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn get(&self, key: &str) -> Option<String> {
        let mut cache = self.cache.lock();
        let fresh = match cache.get(key) {
            Some((value, stored_at)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        };
        if fresh.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        fresh
    }

    fn set(&self, key: String, value: &str) {
        self.cache.lock().put(key, (value.to_string(), Instant::now()));
    }

    async fn cached(&self, operation: Operation, query: &str) -> Result<String, AugmentationError> {
        let key = Self::make_key(operation, query);
        if let Some(value) = self.get(&key) {
            debug!("Augmentation cache hit ({})", operation.as_str());
            return Ok(value);
        }

        let value = match operation {
            Operation::Classify => self.inner.classify(query).await?,
            Operation::Expand => self.inner.expand(query).await?,
        };
        self.set(key, &value);
        Ok(value)
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };

        CacheStats {
            hits,
            misses,
            size: self.cache.lock().len(),
            hit_rate,
        }
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[async_trait]
impl QueryAugmenter for CachedAugmenter {
    async fn classify(&self, query: &str) -> Result<String, AugmentationError> {
        self.cached(Operation::Classify, query).await
    }

    async fn expand(&self, query: &str) -> Result<String, AugmentationError> {
        self.cached(Operation::Expand, query).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
