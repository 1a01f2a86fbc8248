//! Identity provider contract
//!
//! Authentication itself (password hashing, token issuance) lives in the
//! deployment's identity system; the service only needs a way to turn a
//! presented credential into a stable user id.

use crate::error::{ServiceError, ServiceResult};
use std::collections::HashMap;

/// Stable identifier of an authenticated user.
pub type UserId = u64;

/// Turns a presented credential into a user id.
pub trait IdentityProvider {
    /// Authenticate a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Auth`] when the credential is unknown or
    /// the password does not match.
    fn authenticate(&self, username: &str, password: &str) -> ServiceResult<UserId>;
}

/// In-memory identity provider with a fixed user table.
#[derive(Debug, Default)]
pub struct MemoryIdentity {
    users: HashMap<String, (String, UserId)>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user; later registrations with the same name replace
    /// the earlier entry.
    pub fn register(&mut self, username: &str, password: &str, id: UserId) {
        self.users
            .insert(username.to_string(), (password.to_string(), id));
    }
}

impl IdentityProvider for MemoryIdentity {
    fn authenticate(&self, username: &str, password: &str) -> ServiceResult<UserId> {
        match self.users.get(username) {
            Some((stored, id)) if stored == password => Ok(*id),
            _ => Err(ServiceError::Auth(format!(
                "unknown user or bad password for '{}'",
                username
            ))),
        }
    }
}
