//! Request DTOs for the resolver API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

use crate::resolver::UserFilter;

/// Query string for GET /users
///
/// # Fields
/// - `username`: Look the user up by login name
/// - `userid`: Look the user up by id (takes precedence over `username`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub userid: Option<String>,
}

impl UserListQuery {
    /// Converts the query into a filter, ignoring blank parameters.
    pub fn into_filter(self) -> UserFilter {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        UserFilter {
            username: non_blank(self.username),
            userid: non_blank(self.userid),
        }
    }
}

/// Request body for POST /users/:key/check
#[derive(Debug, Clone, Deserialize)]
pub struct CheckPassRequest {
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_list_query_deserialize() {
        let json = r#"{"username": "alice"}"#;
        let query: UserListQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.username.as_deref(), Some("alice"));
        assert!(query.userid.is_none());
    }

    #[test]
    fn test_blank_parameters_are_dropped() {
        let query = UserListQuery {
            username: Some("  ".to_string()),
            userid: Some(String::new()),
        };
        assert_eq!(query.into_filter(), UserFilter::default());
    }

    #[test]
    fn test_into_filter_keeps_values() {
        let query = UserListQuery {
            username: Some("alice".to_string()),
            userid: Some("123".to_string()),
        };
        let filter = query.into_filter();
        assert_eq!(filter.lookup_key(), Some("123"));
    }

    #[test]
    fn test_check_pass_request_deserialize() {
        let req: CheckPassRequest = serde_json::from_str(r#"{"password": "x"}"#).unwrap();
        assert_eq!(req.password, "x");
    }
}
