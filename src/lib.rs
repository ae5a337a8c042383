//! HTTP Resolver - identity lookups through a time-bounded cache
//!
//! Resolves user ids and user names against a remote HTTP endpoint and keeps
//! the answers in a cache that expires entries by insertion age.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;

pub use api::AppState;
pub use config::{RefreshPolicy, ResolverConfig};
pub use error::ResolverError;
pub use resolver::{IdResolver, LookupService, UserFilter, UserRecord, UserSource};
