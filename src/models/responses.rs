//! Response DTOs for the resolver API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::resolver::{ResolverDescriptor, UserRecord};

/// Response body for a single projected field (GET /users/:key/username, /userid)
#[derive(Debug, Clone, Serialize)]
pub struct UserFieldResponse {
    /// The key that was resolved
    pub key: String,
    /// Name of the projected field
    pub field: String,
    /// Field value, empty when unknown
    pub value: String,
}

impl UserFieldResponse {
    pub fn new(key: impl Into<String>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Response body for the user listing (GET /users)
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserRecord>,
}

impl UserListResponse {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }
}

/// Response body for a password check (POST /users/:key/check)
#[derive(Debug, Clone, Serialize)]
pub struct CheckPassResponse {
    pub authenticated: bool,
}

/// Response body for the resolver description (GET /resolver)
#[derive(Debug, Clone, Serialize)]
pub struct ResolverInfoResponse {
    /// Resolver instance id, e.g. `http.localhost`
    pub id: String,
    /// Resolver type name
    pub resolver_type: String,
    /// Whether the resolver accepts user updates
    pub updateable: bool,
    /// Descriptor keyed by resolver type
    pub descriptor: BTreeMap<String, ResolverDescriptor>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Successful remote fetches
    pub fetches: u64,
    /// Failed remote fetches
    pub fetch_failures: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            fetches: stats.fetches,
            fetch_failures: stats.fetch_failures,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_field_response_serialize() {
        let resp = UserFieldResponse::new("123", "username", "alice");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["key"], "123");
        assert_eq!(json["field"], "username");
        assert_eq!(json["value"], "alice");
    }

    #[test]
    fn test_stats_response_from_stats() {
        let mut stats = CacheStats::new();
        for _ in 0..4 {
            stats.record_hit();
        }
        stats.record_miss();
        stats.record_fetch_failure();

        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.fetch_failures, 1);
    }

    #[test]
    fn test_empty_user_list_serialize() {
        let json = serde_json::to_string(&UserListResponse::new(Vec::new())).unwrap();
        assert_eq!(json, r#"{"users":[]}"#);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("User not found: bob");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("User not found: bob"));
    }
}
