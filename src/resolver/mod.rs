//! Resolver Module
//!
//! Identity lookups against a remote HTTP endpoint, cached by insertion age.

mod descriptor;
mod record;
mod service;
mod source;

pub use descriptor::{ConfigFieldType, IdResolver, ResolverDescriptor};
pub use record::{UserFilter, UserRecord, USERID_FIELD, USERNAME_FIELD};
pub use service::{LookupService, RESOLVER_TYPE};
pub use source::{HttpUserSource, UserSource};
