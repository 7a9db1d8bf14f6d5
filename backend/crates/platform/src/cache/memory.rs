//! In-memory cache backend
//!
//! Single-process stand-in for Redis with the same TTL semantics. Used
//! by tests and local runs; also counts calls and can simulate outages
//! and latency.

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

use super::{CacheBackend, CacheError, CacheResult};

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct Inner {
    entries: DashMap<String, Entry>,
    unavailable: AtomicBool,
    latency_ms: AtomicU64,
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
}

#[derive(Debug, thiserror::Error)]
#[error("in-memory cache marked unavailable")]
struct Unavailable;

/// In-memory key-value backend with per-entry expiry
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    inner: Arc<Inner>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a backend outage
    pub fn set_available(&self, available: bool) {
        self.inner.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Delay every operation by `latency`
    pub fn set_latency(&self, latency: Duration) {
        self.inner
            .latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn get_calls(&self) -> usize {
        self.inner.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.inner.set_calls.load(Ordering::SeqCst)
    }

    /// Live (unexpired) entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.inner
            .entries
            .iter()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn simulate(&self) -> CacheResult<()> {
        let latency = self.inner.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(CacheError::backend(Unavailable));
        }
        Ok(())
    }
}

impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.inner.get_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;

        let now = Instant::now();
        let expired = match self.inner.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.inner
                .entries
                .remove_if(key, |_, entry| entry.expires_at <= now);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()> {
        self.inner.set_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;

        self.inner.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryCache::new();
        CacheBackend::set(&cache, "k", "v".to_string(), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(
            CacheBackend::get(&cache, "k").await.unwrap().as_deref(),
            Some("v")
        );
        assert_eq!(cache.len(), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(CacheBackend::get(&cache, "k").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_overwrite_refreshes_value() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        CacheBackend::set(&cache, "k", "one".to_string(), ttl)
            .await
            .unwrap();
        CacheBackend::set(&cache, "k", "two".to_string(), ttl)
            .await
            .unwrap();

        assert_eq!(
            CacheBackend::get(&cache, "k").await.unwrap().as_deref(),
            Some("two")
        );
        assert_eq!(cache.set_calls(), 2);
        assert_eq!(cache.get_calls(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_backend_errors() {
        let cache = MemoryCache::new();
        cache.set_available(false);

        assert!(CacheBackend::get(&cache, "k").await.is_err());
        cache.set_available(true);
        assert!(CacheBackend::get(&cache, "k").await.unwrap().is_none());
    }
}
