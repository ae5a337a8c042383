//! API Handlers
//!
//! HTTP request handlers exposing the resolver operations.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::config::ResolverConfig;
use crate::error::{ResolverError, Result};
use crate::models::{
    CheckPassRequest, CheckPassResponse, HealthResponse, ResolverInfoResponse, StatsResponse,
    UserFieldResponse, UserListQuery, UserListResponse,
};
use crate::resolver::{IdResolver, LookupService, UserRecord, USERID_FIELD, USERNAME_FIELD};

/// Application state shared across all handlers.
///
/// The lookup service guards its own cache, so handlers only share an Arc.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<LookupService>,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(resolver: LookupService) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the HTTP user source and lookup service from the Config.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Ok(Self::new(LookupService::from_config(config)?))
    }
}

/// Handler for GET /users/:key
///
/// Returns the user record, or 404 when nothing could be resolved.
pub async fn user_info_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<UserRecord>> {
    let record = state.resolver.get_user_info(&key).await;
    if record.is_empty() {
        return Err(ResolverError::NotFound(key));
    }
    Ok(Json(record))
}

/// Handler for GET /users/:key/username
pub async fn username_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<UserFieldResponse> {
    let username = state.resolver.get_username(&key).await;
    Json(UserFieldResponse::new(key, USERNAME_FIELD, username))
}

/// Handler for GET /users/:key/userid
pub async fn userid_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<UserFieldResponse> {
    let userid = state.resolver.get_user_id(&key).await;
    Json(UserFieldResponse::new(key, USERID_FIELD, userid))
}

/// Handler for GET /users
///
/// Lists at most one user selected by `userid` or `username`.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Json<UserListResponse> {
    let filter = query.into_filter();
    Json(UserListResponse::new(state.resolver.list_users(&filter).await))
}

/// Handler for POST /users/:key/check
///
/// The resolver is read-only, so every check is denied.
pub async fn check_pass_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<CheckPassRequest>,
) -> Json<CheckPassResponse> {
    let authenticated = state.resolver.check_pass(&key, &req.password);
    if !authenticated {
        info!(key = %key, "Password check denied");
    }
    Json(CheckPassResponse { authenticated })
}

/// Handler for GET /resolver
pub async fn resolver_info_handler(State(state): State<AppState>) -> Json<ResolverInfoResponse> {
    let resolver_type = LookupService::resolver_type();
    Json(ResolverInfoResponse {
        id: state.resolver.resolver_id(),
        resolver_type: resolver_type.to_string(),
        updateable: state.resolver.is_updateable(),
        descriptor: LookupService::descriptor().keyed(resolver_type),
    })
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.resolver.stats().await.into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
