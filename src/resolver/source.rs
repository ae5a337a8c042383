//! User Source Module
//!
//! The remote side of a lookup: fetch the record behind a lookup URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::{ResolverError, Result};
use crate::resolver::UserRecord;

// == User Source ==
/// Fetches a user record from wherever user information lives.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetches the record at `url`. Makes a single attempt.
    async fn fetch(&self, url: &str) -> Result<UserRecord>;
}

// == HTTP User Source ==
/// `UserSource` that issues an authenticated `GET` against the lookup URL.
#[derive(Debug, Clone)]
pub struct HttpUserSource {
    client: Client,
    username: String,
    password: String,
}

impl HttpUserSource {
    /// Builds a source with the given basic auth credentials and timeout.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ResolverError::Network)?;

        Ok(Self {
            client,
            username: username.into(),
            password: password.into(),
        })
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Self::new(&config.username, &config.password, config.fetch_timeout)
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    async fn fetch(&self, url: &str) -> Result<UserRecord> {
        debug!(url, "Fetching user info");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(ResolverError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolverError::Transport {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(ResolverError::from_request)?;

        serde_json::from_slice(&body).map_err(|e| {
            ResolverError::Parse(format!("{}, got {}", e, String::from_utf8_lossy(&body)))
        })
    }
}
