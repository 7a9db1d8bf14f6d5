//! Rate Limiting Infrastructure
//!
//! Admission control in front of the request handlers:
//! - [`window`] - pure fixed-window arithmetic
//! - [`fixed_window`] - in-process per-client fixed-window limiter
//!
//! The limiter state lives in this process only. Running several API
//! instances multiplies the effective limit by the instance count.

pub mod fixed_window;
pub mod window;

use std::time::Duration;

use crate::client::ClientKey;

pub use fixed_window::FixedWindowLimiter;

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests admitted per client in one window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
    /// When false no limiter is built at all
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 50,
            window: Duration::from_secs(1),
            enabled: true,
        }
    }
}

/// Rejected limiter configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitConfigError {
    #[error("rate limit max_requests must be greater than zero")]
    ZeroRequests,
    #[error("rate limit window must be greater than zero")]
    ZeroWindow,
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), RateLimitConfigError> {
        if self.max_requests == 0 {
            return Err(RateLimitConfigError::ZeroRequests);
        }
        if self.window.is_zero() {
            return Err(RateLimitConfigError::ZeroWindow);
        }
        Ok(())
    }

    /// Build the limiter, or `None` when rate limiting is switched off
    ///
    /// Disabled mode never constructs limiter state; callers skip the
    /// admission layer entirely.
    pub fn build(&self) -> Result<Option<FixedWindowLimiter>, RateLimitConfigError> {
        if !self.enabled {
            return Ok(None);
        }
        FixedWindowLimiter::new(self.max_requests, self.window).map(Some)
    }
}

/// Outcome of one admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests left in the current window after this one
    pub remaining: u32,
    /// Zero when admitted; the full window length when rejected
    pub retry_after: Duration,
}

impl RateLimitDecision {
    pub fn admitted(remaining: u32) -> Self {
        Self {
            allowed: true,
            remaining,
            retry_after: Duration::ZERO,
        }
    }

    pub fn rejected(retry_after: Duration) -> Self {
        Self {
            allowed: false,
            remaining: 0,
            retry_after,
        }
    }
}

/// Admission limiter seam
///
/// The check is in-memory and must not block; implementations take a
/// short per-key lock at most.
pub trait RateLimiter: Send + Sync {
    fn allow(&self, key: &ClientKey) -> RateLimitDecision;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 50);
        assert_eq!(config.window, Duration::from_secs(1));
        assert!(config.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        assert_eq!(
            RateLimitConfig::new(0, 1).validate(),
            Err(RateLimitConfigError::ZeroRequests)
        );
        assert_eq!(
            RateLimitConfig::new(10, 0).validate(),
            Err(RateLimitConfigError::ZeroWindow)
        );
    }

    #[test]
    fn test_build_disabled_constructs_nothing() {
        let config = RateLimitConfig {
            max_requests: 0,
            ..RateLimitConfig::disabled()
        };
        // Invalid values are irrelevant when switched off
        assert!(matches!(config.build(), Ok(None)));
    }

    #[test]
    fn test_build_enabled() {
        let limiter = RateLimitConfig::new(3, 5).build().unwrap().unwrap();
        assert_eq!(limiter.max_requests(), 3);
        assert_eq!(limiter.window(), Duration::from_secs(5));
    }
}
