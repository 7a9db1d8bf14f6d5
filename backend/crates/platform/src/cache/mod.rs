//! Cache Infrastructure
//!
//! Typed read-through cache over a key-value backend.
//!
//! The cache is a disposable projection of the database: it never loads
//! from the store itself. Callers check the cache, fall back to the store
//! on a miss, and then populate the cache (cache-aside). Entries expire
//! after a fixed TTL enforced by the backend.

pub mod memory;
pub mod redis_store;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

pub use memory::MemoryCache;
pub use redis_store::RedisCache;

/// Cache-specific result type alias
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache errors
///
/// None of these should fail a request. Readers treat every variant
/// except `Unresolved` as a miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The entity has no persisted identity yet
    #[error("cannot cache an entity that has not been persisted")]
    Unresolved,

    /// Backend unreachable or returned an error
    #[error("cache backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),

    /// Stored snapshot could not be encoded or decoded
    #[error("cache entry codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl CacheError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CacheError::Backend(Box::new(err))
    }
}

/// Raw key-value backend with per-entry TTL
#[trait_variant::make(CacheBackend: Send)]
pub trait LocalCacheBackend {
    /// `Ok(None)` when the key does not exist or has expired
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()>;
}

/// An entity that can be cached under `"<entity>-<id>"`
pub trait Cacheable: Serialize + DeserializeOwned + Send + Sync {
    /// Key prefix, e.g. `"post"`
    const ENTITY: &'static str;

    type Id: fmt::Display + Send + Sync;

    /// `None` until the store has assigned an identity
    fn cache_id(&self) -> Option<Self::Id>;
}

/// Cache key for an entity id
pub fn cache_key<T: Cacheable>(id: &T::Id) -> String {
    format!("{}-{}", T::ENTITY, id)
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Lifetime of every entry, independent of entity type
    pub ttl: Duration,
    /// Upper bound for a single backend round trip
    pub op_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl: Duration::from_secs(60),
            op_timeout: Duration::from_millis(500),
        }
    }
}

/// Typed cache for one entity type
///
/// A disabled cache holds no backend: `get` answers `None` and `set`
/// succeeds without any I/O.
pub struct EntityCache<T, B> {
    backend: Option<B>,
    ttl: Duration,
    op_timeout: Duration,
    _entity: PhantomData<fn() -> T>,
}

impl<T, B: Clone> Clone for EntityCache<T, B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            ttl: self.ttl,
            op_timeout: self.op_timeout,
            _entity: PhantomData,
        }
    }
}

impl<T, B> EntityCache<T, B>
where
    T: Cacheable,
    B: CacheBackend + Sync,
{
    /// Honors `config.enabled`; the backend is dropped when disabled
    pub fn new(backend: B, config: &CacheConfig) -> Self {
        Self {
            backend: config.enabled.then_some(backend),
            ttl: config.ttl,
            op_timeout: config.op_timeout,
            _entity: PhantomData,
        }
    }

    pub fn disabled() -> Self {
        let config = CacheConfig::default();
        Self {
            backend: None,
            ttl: config.ttl,
            op_timeout: config.op_timeout,
            _entity: PhantomData,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached snapshot for `id`, or `None` on a miss
    pub async fn get(&self, id: &T::Id) -> CacheResult<Option<T>> {
        let Some(backend) = &self.backend else {
            return Ok(None);
        };

        let key = cache_key::<T>(id);
        let raw = self.bounded(CacheBackend::get(backend, &key)).await?;

        match raw {
            Some(data) if !data.is_empty() => Ok(Some(serde_json::from_str(&data)?)),
            _ => Ok(None),
        }
    }

    /// Store a snapshot of `entity` for the configured TTL
    ///
    /// A disabled cache accepts anything, unpersisted entities included.
    pub async fn set(&self, entity: &T) -> CacheResult<()> {
        let Some(backend) = &self.backend else {
            return Ok(());
        };
        let id = entity.cache_id().ok_or(CacheError::Unresolved)?;

        let key = cache_key::<T>(&id);
        let payload = serde_json::to_string(entity)?;
        self.bounded(CacheBackend::set(backend, &key, payload, self.ttl))
            .await
    }

    async fn bounded<F, R>(&self, op: F) -> CacheResult<R>
    where
        F: Future<Output = CacheResult<R>>,
    {
        tokio::time::timeout(self.op_timeout, op)
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout))?
    }
}
