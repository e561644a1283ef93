//! # Sessions
//!
//! A [`Session`] is the explicit context an authenticated client works in:
//! who the user is, the bearer token the backend issued, and the
//! [`PasscodeCache`] of file passcodes verified so far.
//!
//! A session starts with [`Session::begin`] after login and is torn down with
//! [`Session::end`] on logout. Passcodes never outlive the session.

mod passcode_cache;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::permissions::Role;

pub use passcode_cache::{Passcode, PasscodeCache};

/// The authenticated user, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "user_id")]
    pub id: u64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

pub struct Session {
    user: User,
    token: String,
    passcodes: PasscodeCache,
}

impl Session {
    pub fn begin(user: User, token: impl Into<String>) -> Self {
        tracing::debug!(user = %user.username, role = %user.role, "session started");
        Self {
            user,
            token: token.into(),
            passcodes: PasscodeCache::new(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn passcodes(&self) -> &PasscodeCache {
        &self.passcodes
    }

    /// Tear the session down. Every cached passcode is dropped.
    pub fn end(&self) {
        tracing::debug!(
            user = %self.user.username,
            cached = self.passcodes.len(),
            "session ended"
        );
        self.passcodes.clear();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("passcodes", &self.passcodes)
            .finish()
    }
}
