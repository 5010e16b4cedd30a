use crate::core::cache::Cache;
use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct CacheValue<V> {
    value: V,
    inserted_at: Instant,
    ttl: Option<Duration>,
}

impl<V> CacheValue<V> {
    fn is_stale(&self, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.duration_since(self.inserted_at) >= ttl)
    }
}

/// In-memory cache implementation using a HashMap behind an async mutex
pub struct MemoryCache<K, V> {
    inner: Arc<Mutex<HashMap<K, CacheValue<V>>>>,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K, V> Cache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync + std::fmt::Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.lock().await;
        let stale = match cache.get(key) {
            Some(entry) if entry.is_stale(Instant::now()) => true,
            Some(entry) => {
                debug!("Cache HIT for key: {:?}", key);
                return Some(entry.value.clone());
            }
            None => false,
        };
        if stale {
            debug!("Cache entry expired for key: {:?}", key);
            cache.remove(key);
        } else {
            debug!("Cache MISS for key: {:?}", key);
        }
        None
    }

    async fn put(&self, key: K, value: V, ttl: Option<Duration>) {
        let cache_value = CacheValue {
            value,
            inserted_at: Instant::now(),
            ttl,
        };

        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {:?}", key);
        cache.insert(key, cache_value);
    }

    async fn remove(&self, key: &K) {
        let mut cache = self.inner.lock().await;
        cache.remove(key);
        debug!("Cache REMOVE for key: {:?}", key);
    }

    async fn clear(&self) {
        let mut cache = self.inner.lock().await;
        cache.clear();
        debug!("Cache CLEAR");
    }

    async fn evict_stale(&self) -> usize {
        let mut cache = self.inner.lock().await;
        let now = Instant::now();
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_stale(now));
        let evicted = before - cache.len();
        debug!("Cache EVICT removed {} stale entries", evicted);
        evicted
    }
}
