//! Error types for the Ironroll service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Main error type for Ironroll operations.
#[derive(Error, Debug)]
pub enum IronrollError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A modifier supplied by a client was not an integer
    #[error("invalid modifier: {0:?}")]
    InvalidModifier(String),

    /// The client exceeded its request budget
    #[error("rate limit exceeded")]
    RateLimited,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for IronrollError {
    fn from(e: config::ConfigError) -> Self {
        IronrollError::Config(e.to_string())
    }
}

impl IronrollError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            IronrollError::InvalidModifier(_) => StatusCode::BAD_REQUEST,
            IronrollError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            IronrollError::Config(_) | IronrollError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IronrollError {
    fn into_response(self) -> Response {
        let body = match &self {
            IronrollError::InvalidModifier(_) => "invalid modifier".to_string(),
            IronrollError::RateLimited => self.to_string(),
            _ => "internal server error".to_string(),
        };
        (self.status_code(), body).into_response()
    }
}

/// Result type alias for Ironroll operations.
pub type Result<T> = std::result::Result<T, IronrollError>;
