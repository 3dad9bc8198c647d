//! Per-key visitor records.

use std::time::{Duration, Instant};

/// The limiter's record for a single client key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visitor {
    /// Requests observed in the current window
    pub count: u64,
    /// End of the current counting window
    pub window_expires_at: Instant,
    /// When the current block started, if any
    pub blocked_since: Option<Instant>,
}

impl Visitor {
    /// Create a record for a key seen for the first time at `now`.
    pub fn first_seen(now: Instant, window: Duration) -> Self {
        Self {
            count: 1,
            window_expires_at: now + window,
            blocked_since: None,
        }
    }

    /// Whether a block is still in force at `now`.
    pub fn is_blocked_at(&self, now: Instant, block_duration: Duration) -> bool {
        match self.blocked_since {
            Some(since) => now.saturating_duration_since(since) < block_duration,
            None => false,
        }
    }

    /// Whether the counting window has elapsed at `now`.
    pub fn window_expired_at(&self, now: Instant) -> bool {
        now >= self.window_expires_at
    }

    /// Start a fresh window at `now`, clearing any block.
    pub fn reset(&mut self, now: Instant, window: Duration) {
        self.count = 1;
        self.window_expires_at = now + window;
        self.blocked_since = None;
    }
}
