//! Per-client rate limiting.
//!
//! The limiter is best-effort and instance-local: counters live in memory,
//! reset on restart, and apply per process.

mod key;
mod limiter;
mod visitor;

pub use key::ClientKey;
pub use limiter::{LimitConfig, RateLimiter};
pub use visitor::Visitor;
