//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).
//! Anything unparsable fails startup instead of falling back silently.

use anyhow::{Context, bail};
use platform::cache::CacheConfig;
use platform::rate_limit::RateLimitConfig;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub addr: SocketAddr,
    /// Deployment name reported by the health check
    pub env: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub frontend_origins: Vec<String>,
    /// Upper bound for a whole request
    pub http_timeout: Duration,
    pub rate_limit: RateLimitConfig,
    pub cache: CacheConfig,
    pub redis_url: String,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let rate_limit = RateLimitConfig {
            max_requests: parse_or(&var, "RL_REQUESTS_COUNT", 50)?,
            window: Duration::from_secs(parse_or(&var, "RL_WINDOW_SECS", 1)?),
            enabled: parse_bool_or(&var, "RL_ENABLED", true)?,
        };
        if rate_limit.enabled {
            rate_limit.validate().context("invalid rate limit settings")?;
        }

        let cache = CacheConfig {
            enabled: parse_bool_or(&var, "REDIS_ENABLED", false)?,
            ttl: Duration::from_secs(parse_or(&var, "CACHE_TTL_SECS", 60)?),
            op_timeout: Duration::from_millis(parse_or(&var, "CACHE_OP_TIMEOUT_MS", 500)?),
        };
        if cache.ttl.is_zero() {
            bail!("CACHE_TTL_SECS must be greater than zero");
        }

        let http_timeout = Duration::from_secs(parse_or(&var, "HTTP_TIMEOUT_SECS", 60)?);
        if http_timeout.is_zero() {
            bail!("HTTP_TIMEOUT_SECS must be greater than zero");
        }

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            addr: parse_or(&var, "ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            env: var("ENV").unwrap_or_else(|| "development".to_string()),
            database_url,
            db_max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", 20)?,
            frontend_origins,
            http_timeout,
            rate_limit,
            cache,
            redis_url: var("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379/0".to_string()),
        })
    }
}

fn parse_or<T, V>(var: &V, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    V: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

fn parse_bool_or<V>(var: &V, key: &str, default: bool) -> anyhow::Result<bool>
where
    V: Fn(&str) -> Option<String>,
{
    match var(key).map(|raw| raw.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(raw) => match raw.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => bail!("{key} must be a boolean, got {raw:?}"),
        },
    }
}
