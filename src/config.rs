//! Configuration Module
//!
//! Handles loading the lookup endpoint settings, cache TTL and listen port,
//! either from environment variables or from a host-supplied key/value map.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::error::{ResolverError, Result};

// == Refresh Policy ==
/// Decides when a resolve goes to the lookup endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Fetch when the cache has no record for the key, reuse it otherwise.
    #[default]
    FetchOnMiss,
    /// Fetch only when the cache already holds a record for the key and serve
    /// an empty record on a miss. Matches resolvers deployed with the older
    /// behaviour.
    RefreshOnHit,
}

impl RefreshPolicy {
    /// Returns true when a resolve that found `cached_is_empty` should fetch.
    pub fn should_fetch(self, cached_is_empty: bool) -> bool {
        match self {
            RefreshPolicy::FetchOnMiss => cached_is_empty,
            RefreshPolicy::RefreshOnHit => !cached_is_empty,
        }
    }

    /// Parses an optional environment value, falling back to the default
    /// policy. An unrecognised value is reported rather than ignored.
    fn from_env_value(raw: Option<String>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        raw.parse().unwrap_or_else(|e| {
            warn!(value = %raw, error = %e, "Ignoring REFRESH_POLICY, using fetch-on-miss");
            Self::default()
        })
    }
}

impl FromStr for RefreshPolicy {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fetch-on-miss" => Ok(RefreshPolicy::FetchOnMiss),
            "refresh-on-hit" => Ok(RefreshPolicy::RefreshOnHit),
            other => Err(ResolverError::InvalidConfig(format!(
                "Unknown refresh policy '{}'",
                other
            ))),
        }
    }
}

/// Resolver configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Lookup endpoint host
    pub server: String,
    /// Lookup endpoint port
    pub port: u16,
    /// URL scheme of the lookup endpoint
    pub schema: String,
    /// Path prefix under which user keys are appended
    pub path: String,
    /// Basic auth user for the lookup endpoint
    pub username: String,
    /// Basic auth password for the lookup endpoint
    pub password: String,
    /// Maximum age of a cached record
    pub cache_ttl: Duration,
    /// Upper bound on a single remote fetch
    pub fetch_timeout: Duration,
    /// When resolves go to the lookup endpoint
    pub refresh_policy: RefreshPolicy,
    /// Port the HTTP API listens on
    pub listen_port: u16,
}

impl ResolverConfig {
    /// Creates a new ResolverConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `RESOLVER_SERVER` - Lookup host (default: localhost)
    /// - `RESOLVER_PORT` - Lookup port (default: 8080)
    /// - `RESOLVER_SCHEMA` - Lookup scheme (default: http)
    /// - `RESOLVER_PATH` - Lookup path prefix (default: /)
    /// - `RESOLVER_USERNAME` / `RESOLVER_PASSWORD` - Basic auth (default: empty)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 10)
    /// - `FETCH_TIMEOUT` - Fetch timeout in seconds (default: 5)
    /// - `REFRESH_POLICY` - `fetch-on-miss` or `refresh-on-hit` (default: fetch-on-miss)
    /// - `SERVER_PORT` - HTTP API port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: env::var("RESOLVER_SERVER").unwrap_or(defaults.server),
            port: env::var("RESOLVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            schema: env::var("RESOLVER_SCHEMA").unwrap_or(defaults.schema),
            path: env::var("RESOLVER_PATH").unwrap_or(defaults.path),
            username: env::var("RESOLVER_USERNAME").unwrap_or(defaults.username),
            password: env::var("RESOLVER_PASSWORD").unwrap_or(defaults.password),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            fetch_timeout: env::var("FETCH_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            refresh_policy: RefreshPolicy::from_env_value(env::var("REFRESH_POLICY").ok()),
            listen_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.listen_port),
        }
    }

    /// Creates a ResolverConfig from the key names a resolver host stores:
    /// `Server`, `Port`, `Schema`, `Path`, `Username` and `Password`.
    ///
    /// Missing keys take their defaults. A `Port` that is not a valid port
    /// number is rejected.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let defaults = Self::default();
        let get = |name: &str, fallback: String| map.get(name).cloned().unwrap_or(fallback);

        let port = match map.get("Port") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ResolverError::InvalidConfig(format!("Port must be a number, got '{}'", raw))
            })?,
            None => defaults.port,
        };

        Ok(Self {
            server: get("Server", defaults.server),
            port,
            schema: get("Schema", defaults.schema),
            path: get("Path", defaults.path),
            username: get("Username", defaults.username),
            password: get("Password", defaults.password),
            ..defaults
        })
    }

    // == Base URL ==
    /// Returns `{schema}://{server}:{port}{path}` with one trailing slash
    /// removed from the path.
    pub fn base_url(&self) -> String {
        let path = self.path.strip_suffix('/').unwrap_or(&self.path);
        format!("{}://{}:{}{}", self.schema, self.server, self.port, path)
    }

    /// Returns the lookup URL for a single user key. The resolver also uses
    /// it as the cache key.
    pub fn user_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url(), key)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            server: "localhost".to_string(),
            port: 8080,
            schema: "http".to_string(),
            path: "/".to_string(),
            username: String::new(),
            password: String::new(),
            cache_ttl: Duration::from_secs(10),
            fetch_timeout: Duration::from_secs(5),
            refresh_policy: RefreshPolicy::FetchOnMiss,
            listen_port: 3000,
        }
    }
}
