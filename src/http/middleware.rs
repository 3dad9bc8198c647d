//! Per-client rate limiting for the HTTP API.

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use tracing::warn;

use super::AppState;
use crate::error::IronrollError;
use crate::ratelimit::ClientKey;

/// Reject requests from clients that are over their limit with 429.
///
/// The client is identified by the connection's peer address only.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = ClientKey::from_peer(peer);

    if !state.limiter.allow(&key) {
        warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
        return IronrollError::RateLimited.into_response();
    }

    next.run(request).await
}
