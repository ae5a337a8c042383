//! User Record Module
//!
//! The payload returned by the lookup endpoint and the filter used to list
//! users.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the login name.
pub const USERNAME_FIELD: &str = "username";
/// Field holding the user id.
pub const USERID_FIELD: &str = "userid";

// == User Record ==
/// Attributes of one user as returned by the lookup endpoint.
///
/// The cache never inspects the contents; only the resolver projects named
/// fields out of it. An empty record means "no user information".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // == Field Projection ==
    /// Returns `field` rendered as a string, or an empty string when absent.
    ///
    /// Strings are returned unquoted, numbers and booleans as their JSON text.
    pub fn field_str(&self, field: &str) -> String {
        match self.0.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
            _ => String::new(),
        }
    }

    pub fn username(&self) -> String {
        self.field_str(USERNAME_FIELD)
    }

    pub fn userid(&self) -> String {
        self.field_str(USERID_FIELD)
    }
}

// == User Filter ==
/// Search criteria for listing users. Only point lookups are supported, so
/// at most one criterion is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserFilter {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub userid: Option<String>,
}

impl UserFilter {
    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            userid: None,
        }
    }

    pub fn by_userid(userid: impl Into<String>) -> Self {
        Self {
            username: None,
            userid: Some(userid.into()),
        }
    }

    /// Returns the key to resolve: `userid` when set, otherwise `username`.
    pub fn lookup_key(&self) -> Option<&str> {
        self.userid.as_deref().or(self.username.as_deref())
    }
}
