//! Fixed-window limiter
//!
//! One counter per client key in a sharded map. The counter's window
//! start travels with it, so expiry is decided per counter instance and
//! a sweep can never remove a window opened after the one it judged.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::window;
use super::{RateLimitConfigError, RateLimitDecision, RateLimiter};
use crate::client::ClientKey;

#[derive(Debug, Clone, Copy)]
struct ClientCounter {
    count: u32,
    window_start: Instant,
}

impl ClientCounter {
    fn open(now: Instant) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }
}

struct LimiterState {
    max_requests: u32,
    window: Duration,
    counters: DashMap<ClientKey, ClientCounter>,
}

impl LimiterState {
    fn allow(&self, key: &ClientKey, now: Instant) -> RateLimitDecision {
        // The entry guard holds this key's shard lock for the whole
        // read-modify-write; other shards stay available.
        match self.counters.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(ClientCounter::open(now));
                RateLimitDecision::admitted(self.max_requests - 1)
            }
            Entry::Occupied(mut slot) => {
                let counter = slot.get_mut();
                if window::is_expired(counter.window_start, self.window, now) {
                    *counter = ClientCounter::open(now);
                    RateLimitDecision::admitted(self.max_requests - 1)
                } else if counter.count < self.max_requests {
                    counter.count += 1;
                    RateLimitDecision::admitted(self.max_requests - counter.count)
                } else {
                    RateLimitDecision::rejected(self.window)
                }
            }
        }
    }

    fn sweep(&self, now: Instant) -> usize {
        let mut removed = 0;
        self.counters.retain(|_, counter| {
            let keep = !window::is_expired(counter.window_start, self.window, now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }
}

/// In-process per-client fixed-window limiter
///
/// Cheap to clone; clones share the same counters.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    state: Arc<LimiterState>,
}

impl FixedWindowLimiter {
    /// Rejects a zero `max_requests` or a zero `window`
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, RateLimitConfigError> {
        if max_requests == 0 {
            return Err(RateLimitConfigError::ZeroRequests);
        }
        if window.is_zero() {
            return Err(RateLimitConfigError::ZeroWindow);
        }

        Ok(Self {
            state: Arc::new(LimiterState {
                max_requests,
                window,
                counters: DashMap::new(),
            }),
        })
    }

    pub fn max_requests(&self) -> u32 {
        self.state.max_requests
    }

    pub fn window(&self) -> Duration {
        self.state.window
    }

    /// Number of clients with a live (or not yet swept) counter
    pub fn tracked_clients(&self) -> usize {
        self.state.counters.len()
    }

    /// Drop every counter whose window has elapsed
    ///
    /// Returns how many counters were removed.
    pub fn sweep(&self) -> usize {
        self.state.sweep(Instant::now())
    }

    /// Start the background sweeper, one tick per window
    ///
    /// The task runs independently of any request and stops on its own
    /// once every clone of this limiter has been dropped.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let state: Weak<LimiterState> = Arc::downgrade(&self.state);
        let period = self.state.window;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(state) = state.upgrade() else {
                    tracing::debug!("Rate limiter dropped, sweeper exiting");
                    break;
                };
                let removed = state.sweep(Instant::now());
                if removed > 0 {
                    tracing::debug!(
                        removed = removed,
                        remaining = state.counters.len(),
                        "Swept expired rate limit windows"
                    );
                }
            }
        })
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn allow(&self, key: &ClientKey) -> RateLimitDecision {
        let decision = self.state.allow(key, Instant::now());
        if !decision.allowed {
            tracing::debug!(
                client = %key,
                max = self.state.max_requests,
                "Admission rejected"
            );
        }
        decision
    }
}
