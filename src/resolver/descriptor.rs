//! Resolver Capability Module
//!
//! The narrow interface a resolver host consumes, and the descriptor that
//! advertises the resolver type and its configuration schema.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::resolver::{UserFilter, UserRecord};

// == Id Resolver ==
/// Read-only identity resolver.
#[async_trait]
pub trait IdResolver: Send + Sync {
    /// Identifier of this resolver instance, `<type prefix>.<instance>`.
    fn resolver_id(&self) -> String;

    /// Returns all attributes for a user id or user name. An empty record
    /// means the user could not be resolved.
    async fn get_user_info(&self, userid_or_username: &str) -> UserRecord;

    /// Whether the resolver can write user data back. Never true here.
    fn is_updateable(&self) -> bool {
        false
    }

    /// Password checks are not supported; always denies.
    fn check_pass(&self, _userid: &str, _password: &str) -> bool {
        false
    }

    async fn get_username(&self, userid: &str) -> String {
        self.get_user_info(userid).await.username()
    }

    async fn get_user_id(&self, username: &str) -> String {
        self.get_user_info(username).await.userid()
    }

    /// Lists at most one user matching `filter`; an empty filter lists nobody.
    async fn list_users(&self, filter: &UserFilter) -> Vec<UserRecord> {
        let Some(key) = filter.lookup_key() else {
            return Vec::new();
        };

        let record = self.get_user_info(key).await;
        if record.is_empty() {
            Vec::new()
        } else {
            vec![record]
        }
    }
}

// == Config Field Type ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFieldType {
    String,
    Int,
}

// == Resolver Descriptor ==
/// Describes a resolver type to the host: its class and configuration keys.
#[derive(Debug, Clone, Serialize)]
pub struct ResolverDescriptor {
    pub clazz: String,
    pub config: BTreeMap<String, ConfigFieldType>,
}

impl ResolverDescriptor {
    /// Descriptor for the HTTP lookup resolver.
    pub fn http() -> Self {
        let config = [
            ("Server", ConfigFieldType::String),
            ("Port", ConfigFieldType::Int),
            ("Schema", ConfigFieldType::String),
            ("Path", ConfigFieldType::String),
            ("Username", ConfigFieldType::String),
            ("Password", ConfigFieldType::String),
        ]
        .into_iter()
        .map(|(name, ty)| (name.to_string(), ty))
        .collect();

        Self {
            clazz: "http_resolver::LookupService".to_string(),
            config,
        }
    }

    /// Wraps the descriptor under its resolver type name.
    pub fn keyed(self, resolver_type: &str) -> BTreeMap<String, ResolverDescriptor> {
        BTreeMap::from([(resolver_type.to_string(), self)])
    }
}
