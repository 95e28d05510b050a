//! In-process [`ContentCache`] backed by moka.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;

use crate::ContentCache;

/// Default maximum number of cached entries.
const DEFAULT_CAPACITY: u64 = 10_000;

/// Cached value together with the TTL it was stored with.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expiry policy that reads the TTL each entry carries, so different keys
/// can live for different durations in the same cache.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory cache with per-entry TTL.
pub struct MemoryCache {
    inner: Cache<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(max_entries: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_entries)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.map(|entry| entry.value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) {
        self.inner.insert(key.to_string(), Entry { value, ttl }).await;
    }

    async fn delete(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let cache = MemoryCache::new();
        cache
            .set("prompt_cache:a", "hello".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("prompt_cache:a").await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn missing_key_is_absent() {
        let cache = MemoryCache::new();
        assert!(cache.get("nope").await.is_none());
    }

    #[tokio::test]
    async fn entries_expire_after_their_own_ttl() {
        let cache = MemoryCache::new();
        cache
            .set("short", "v".to_string(), Duration::from_millis(50))
            .await;
        cache
            .set("long", "v".to_string(), Duration::from_secs(60))
            .await;

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert!(cache.get("short").await.is_none());
        assert_eq!(cache.get("long").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn last_write_wins() {
        let cache = MemoryCache::new();
        cache.set("k", "one".to_string(), Duration::from_secs(60)).await;
        cache.set("k", "two".to_string(), Duration::from_secs(60)).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let cache = MemoryCache::new();
        cache.set("k", "v".to_string(), Duration::from_secs(60)).await;
        cache.delete("k").await;
        assert!(cache.get("k").await.is_none());
        // Deleting again must not fail.
        cache.delete("k").await;
    }
}
