//! API Module
//!
//! HTTP handlers and routing for the resolver REST API.
//!
//! # Endpoints
//! - `GET /users` - List at most one user by `username` or `userid`
//! - `GET /users/:key` - Full user record
//! - `GET /users/:key/username` and `/userid` - Projected fields
//! - `POST /users/:key/check` - Password check (always denied)
//! - `GET /resolver` - Resolver id and descriptor
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
