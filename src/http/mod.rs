//! HTTP API for rolling dice.

mod handler;
mod middleware;
mod server;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::ratelimit::RateLimiter;
use crate::roll::RollEngine;

pub use handler::{roll_handler, RollParams, RollResponse};
pub use middleware::rate_limit;
pub use server::HttpServer;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dice engine used for every roll
    pub engine: Arc<RollEngine>,
    /// Per-client limiter guarding the API
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Create application state from its parts.
    pub fn new(engine: Arc<RollEngine>, limiter: Arc<RateLimiter>) -> Self {
        Self { engine, limiter }
    }
}

/// Build the API router. Every route sits behind the rate limiter.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/roll", get(roll_handler))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit,
        ))
        .with_state(state)
}
