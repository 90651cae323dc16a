//! Caller and account roles.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Role stored on a provisioned user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Assistant,
    Management,
    Admin,
}

/// Role of the caller, as supplied by the session gate.
///
/// `Secretary` only exists for the built-in front-desk login; provisioned
/// front-desk staff carry `Assistant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    Secretary,
    Management,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::Secretary => "secretary",
            Self::Management => "management",
            Self::Admin => "admin",
        }
    }
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        Role::from(self).as_str()
    }
}

impl From<UserRole> for Role {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::Assistant => Self::Assistant,
            UserRole::Management => Self::Management,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "assistant" => Ok(Self::Assistant),
            "secretary" => Ok(Self::Secretary),
            "management" => Ok(Self::Management),
            "admin" => Ok(Self::Admin),
            other => Err(format!(
                "unknown role `{other}`; expected assistant|secretary|management|admin"
            )),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.parse::<Role>()? {
            Role::Assistant => Ok(Self::Assistant),
            Role::Management => Ok(Self::Management),
            Role::Admin => Ok(Self::Admin),
            Role::Secretary => Err(
                "`secretary` is a session role; provision front-desk staff as `assistant`"
                    .to_string(),
            ),
        }
    }
}
