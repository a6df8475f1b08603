//! In-process cache with expiring entries.

use super::CacheInterface;
use async_trait::async_trait;
use glob::Pattern;
use parking_lot::RwLock;
use priceopt_core::{HealthCheck, HealthStatus, PricingError, PricingResult};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Process-local cache. Entries expire lazily on access and are swept by
/// [`InMemoryCache::spawn_purge_task`].
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.read().values().filter(|e| e.is_live(now)).count()
    }

    /// Returns true if no live entries remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops expired entries. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        before - entries.len()
    }

    /// Spawns a task that purges expired entries every `period`.
    ///
    /// The task holds a weak reference and exits once the cache is dropped.
    pub fn spawn_purge_task(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    debug!("Memory cache dropped, stopping purge task");
                    break;
                };
                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!("Purged {} expired cache entries", purged);
                }
            }
        })
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> PricingResult<Option<String>> {
        let now = Instant::now();
        let value = {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
                Some(_) => None,
                None => return Ok(None),
            }
        };

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => {
                debug!("Cache entry expired for key '{}'", key);
                let mut entries = self.entries.write();
                if entries.get(key).is_some_and(|e| !e.is_live(Instant::now())) {
                    entries.remove(key);
                }
            }
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PricingResult<()> {
        let ttl = ttl.max(Duration::from_secs(1));
        self.entries.write().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> PricingResult<bool> {
        let now = Instant::now();
        let removed = self.entries.write().remove(key);
        Ok(removed.is_some_and(|e| e.is_live(now)))
    }

    async fn exists(&self, key: &str) -> PricingResult<bool> {
        let now = Instant::now();
        Ok(self.entries.read().get(key).is_some_and(|e| e.is_live(now)))
    }

    async fn delete_pattern(&self, pattern: &str) -> PricingResult<u64> {
        let matcher = Pattern::new(pattern)
            .map_err(|e| PricingError::Cache(format!("Invalid key pattern '{}': {}", pattern, e)))?;
        let now = Instant::now();
        let mut deleted = 0u64;
        self.entries.write().retain(|key, entry| {
            if matcher.matches(key) {
                if entry.is_live(now) {
                    deleted += 1;
                }
                false
            } else {
                true
            }
        });
        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }
}

#[async_trait]
impl HealthCheck for InMemoryCache {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheExt;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = InMemoryCache::new();
        cache.set_raw("k", "v", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.get_raw("k").await.unwrap(), Some("v".to_string()));
        assert!(cache.exists("k").await.unwrap());
        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
        assert_eq!(cache.get_raw("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = InMemoryCache::new();
        // Zero TTL is raised to the one-second minimum
        cache.set_raw("k", "v", Duration::ZERO).await.unwrap();
        assert!(cache.exists("k").await.unwrap());

        {
            let mut entries = cache.entries.write();
            if let Some(entry) = entries.get_mut("k") {
                entry.expires_at = Instant::now() - Duration::from_millis(1);
            }
        }

        assert_eq!(cache.get_raw("k").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let cache = InMemoryCache::new();
        cache.set_raw("live", "1", Duration::from_secs(60)).await.unwrap();
        cache.set_raw("dead", "2", Duration::from_secs(60)).await.unwrap();
        cache.entries.write().get_mut("dead").unwrap().expires_at = Instant::now();

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_pattern() {
        let cache = InMemoryCache::new();
        let ttl = Duration::from_secs(60);
        cache.set_raw("priceopt:cache:price:A:none", "1", ttl).await.unwrap();
        cache.set_raw("priceopt:cache:price:A:9", "2", ttl).await.unwrap();
        cache.set_raw("priceopt:cache:price:AB:none", "3", ttl).await.unwrap();

        let deleted = cache.delete_pattern("priceopt:cache:price:A:*").await.unwrap();

        assert_eq!(deleted, 2);
        assert!(cache.exists("priceopt:cache:price:AB:none").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_pattern_single_char_wildcard() {
        let cache = InMemoryCache::new();
        let ttl = Duration::from_secs(60);
        cache.set_raw("a:b", "1", ttl).await.unwrap();
        cache.set_raw("a:bc", "2", ttl).await.unwrap();

        assert_eq!(cache.delete_pattern("a:?").await.unwrap(), 1);
        assert!(cache.exists("a:bc").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_pattern_rejects_malformed_pattern() {
        let cache = InMemoryCache::new();
        cache.set_raw("a:b", "1", Duration::from_secs(60)).await.unwrap();

        let result = cache.delete_pattern("a:[").await;

        assert!(matches!(result, Err(PricingError::Cache(_))));
        assert!(cache.exists("a:b").await.unwrap());
    }

    #[tokio::test]
    async fn test_typed_get_and_set() {
        let cache = InMemoryCache::new();
        let ttl = Duration::from_secs(60);

        assert_eq!(cache.get::<f64>("n").await.unwrap(), None);
        cache.set("n", &42.5, ttl).await.unwrap();

        assert_eq!(cache.get::<f64>("n").await.unwrap(), Some(42.5));
    }

    #[tokio::test]
    async fn test_purge_task_sweeps_expired_entries() {
        let cache = Arc::new(InMemoryCache::new());
        cache.set_raw("dead", "1", Duration::from_secs(60)).await.unwrap();
        cache.set_raw("live", "2", Duration::from_secs(60)).await.unwrap();
        cache.entries.write().get_mut("dead").unwrap().expires_at = Instant::now();

        let handle = cache.spawn_purge_task(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Inspect the raw map: expired entries must be gone, not just hidden
        {
            let entries = cache.entries.read();
            assert_eq!(entries.len(), 1);
            assert!(entries.contains_key("live"));
        }
        handle.abort();
    }

    #[tokio::test]
    async fn test_purge_task_stops_when_cache_dropped() {
        let cache = Arc::new(InMemoryCache::new());
        let handle = cache.spawn_purge_task(Duration::from_millis(10));

        drop(cache);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("purge task should exit after the cache is dropped")
            .unwrap();
    }
}
