//! Provisioned user accounts.

use super::role::UserRole;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

pub type UserId = String;

/// Account record managed by the admin role.
///
/// `password` is stored and compared in plaintext; `Debug` redacts it so it
/// never reaches logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    /// Names the first required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("username", &self.username),
            ("password", &self.password),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
