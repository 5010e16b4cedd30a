use async_trait::async_trait;
use std::time::Duration;

/// Key-value cache with optional per-entry time-to-live.
///
/// Expired entries are never returned by `get`; implementations evict them
/// lazily when they are read, or in bulk through `evict_stale`.
#[async_trait]
pub trait Cache<K, V>: Send + Sync {
    async fn get(&self, key: &K) -> Option<V>;
    async fn put(&self, key: K, value: V, ttl: Option<Duration>);
    async fn remove(&self, key: &K);
    async fn clear(&self);
    /// Drops every expired entry and returns how many were removed.
    async fn evict_stale(&self) -> usize;
}
