//! API Routes
//!
//! Configures the Axum router with all resolver endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    check_pass_handler, health_handler, list_users_handler, resolver_info_handler,
    stats_handler, user_info_handler, userid_handler, username_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /users` - List at most one user by `username` or `userid`
/// - `GET /users/:key` - Full user record
/// - `GET /users/:key/username` - Username of a user
/// - `GET /users/:key/userid` - User id of a user
/// - `POST /users/:key/check` - Password check (always denied)
/// - `GET /resolver` - Resolver id and descriptor
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/:key", get(user_info_handler))
        .route("/users/:key/username", get(username_handler))
        .route("/users/:key/userid", get(userid_handler))
        .route("/users/:key/check", post(check_pass_handler))
        .route("/resolver", get(resolver_info_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
