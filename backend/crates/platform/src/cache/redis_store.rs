//! Redis cache backend

use ::redis::AsyncCommands;
use ::redis::aio::ConnectionManager;
use std::time::Duration;

use super::{CacheBackend, CacheError, CacheResult};

/// Redis-backed cache
///
/// Wraps a multiplexed, auto-reconnecting connection; clones share it.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connect to `redis://host:port/db`
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = ::redis::Client::open(url).map_err(CacheError::backend)?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(CacheError::backend)?;

        tracing::info!("Connected to redis cache");
        Ok(Self { conn })
    }
}

impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        // A missing key comes back as nil, which maps onto None
        let value: Option<String> = conn.get(key).await.map_err(CacheError::backend)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
        conn.pset_ex::<_, _, ()>(key, value, ttl_ms)
            .await
            .map_err(CacheError::backend)?;
        Ok(())
    }
}
