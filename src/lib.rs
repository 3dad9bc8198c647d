//! Ironroll - Ironsworn dice rolls as a service
//!
//! This crate rolls the Ironsworn action roll (1d6 + modifier against two
//! d10 challenge dice) and serves it over an HTTP API guarded by a per-client
//! rate limiter, plus Discord and Telegram bot adapters.

pub mod bot;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod ratelimit;
pub mod roll;
