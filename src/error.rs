//! Error types for the resolver
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Resolver Error Enum ==
/// Unified error type for the resolver.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Lookup endpoint answered with a non-success status
    #[error("Lookup endpoint returned status {status}")]
    Transport { status: u16 },

    /// Response body could not be decoded into a user record
    #[error("Could not decode user info: {0}")]
    Parse(String),

    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request exceeded the configured fetch timeout
    #[error("Timed out waiting for the lookup endpoint")]
    Timeout,

    /// Configuration value could not be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No user record is available for the key
    #[error("User not found: {0}")]
    NotFound(String),
}

impl ResolverError {
    /// Classifies a reqwest failure, separating timeouts from other errors.
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResolverError::Timeout
        } else {
            ResolverError::Network(err)
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ResolverError {
    fn into_response(self) -> Response {
        let status = match &self {
            ResolverError::NotFound(_) => StatusCode::NOT_FOUND,
            ResolverError::Transport { .. }
            | ResolverError::Parse(_)
            | ResolverError::Network(_) => StatusCode::BAD_GATEWAY,
            ResolverError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ResolverError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the resolver.
pub type Result<T> = std::result::Result<T, ResolverError>;
