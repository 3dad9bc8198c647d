//! Core rate limiter implementation.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use super::key::ClientKey;
use super::visitor::Visitor;

/// Default number of requests allowed per window.
const DEFAULT_LIMIT: u64 = 30;
/// Default counting window.
const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
/// Default cooldown once the limit is exceeded.
const DEFAULT_BLOCK_DURATION: Duration = Duration::from_secs(5 * 60);

/// Configuration for a rate limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitConfig {
    /// Maximum requests allowed in one window
    pub limit: u64,
    /// Length of the counting window
    pub window: Duration,
    /// How long a key stays blocked after exceeding the limit
    pub block_duration: Duration,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            window: DEFAULT_WINDOW,
            block_duration: DEFAULT_BLOCK_DURATION,
        }
    }
}

/// An in-memory, per-key window counter with temporary blocking.
///
/// One lock covers the whole visitor table, so each decision is a single
/// atomic read-modify-write. Records are never evicted.
pub struct RateLimiter {
    /// Visitor records indexed by client key
    visitors: Mutex<HashMap<ClientKey, Visitor>>,
    config: LimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter.
    pub fn new(limit: u64, window: Duration, block_duration: Duration) -> Self {
        Self::with_config(LimitConfig {
            limit,
            window,
            block_duration,
        })
    }

    /// Create a new rate limiter from a [`LimitConfig`].
    pub fn with_config(config: LimitConfig) -> Self {
        Self {
            visitors: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// The configuration this limiter enforces.
    pub fn config(&self) -> LimitConfig {
        self.config
    }

    /// Decide whether a request from `key` is allowed right now.
    pub fn allow(&self, key: &ClientKey) -> bool {
        self.allow_at(key, Instant::now())
    }

    /// Decide whether a request from `key` arriving at `now` is allowed.
    ///
    /// An active block is checked before window expiry, so a block always
    /// runs its full duration. Once it lapses, a key whose window is still
    /// open keeps its stale count and may be blocked again immediately.
    pub fn allow_at(&self, key: &ClientKey, now: Instant) -> bool {
        let mut visitors = self.visitors.lock();

        let visitor = match visitors.get_mut(key) {
            Some(visitor) => visitor,
            None => {
                trace!(key = %key, "First request from client");
                visitors.insert(key.clone(), Visitor::first_seen(now, self.config.window));
                return true;
            }
        };

        if visitor.is_blocked_at(now, self.config.block_duration) {
            trace!(key = %key, "Client is blocked");
            return false;
        }

        if visitor.window_expired_at(now) {
            trace!(key = %key, "Window expired, resetting counter");
            visitor.reset(now, self.config.window);
            return true;
        }

        visitor.count += 1;
        if visitor.count > self.config.limit {
            visitor.blocked_since = Some(now);
            debug!(
                key = %key,
                count = visitor.count,
                limit = self.config.limit,
                block_secs = self.config.block_duration.as_secs_f64(),
                "Rate limit exceeded, blocking client"
            );
            return false;
        }

        true
    }

    /// Get the current request count for a key.
    ///
    /// Returns `None` if the key has never been seen.
    pub fn current_count(&self, key: &ClientKey) -> Option<u64> {
        self.visitors.lock().get(key).map(|v| v.count)
    }

    /// Whether a key is under an active block at `now`.
    pub fn is_blocked_at(&self, key: &ClientKey, now: Instant) -> bool {
        self.visitors
            .lock()
            .get(key)
            .is_some_and(|v| v.is_blocked_at(now, self.config.block_duration))
    }

    /// Get the number of tracked keys.
    pub fn visitor_count(&self) -> usize {
        self.visitors.lock().len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::with_config(LimitConfig::default())
    }
}
