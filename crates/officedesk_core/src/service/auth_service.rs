//! Session gate: plaintext credential check.
//!
//! There is no real authentication here. Credentials are compared verbatim
//! against two built-in front-office accounts and the user directory.

use crate::model::role::Role;
use crate::repo::user_directory::UserDirectory;
use crate::repo::RepoResult;
use crate::store::KeyValueStore;
use log::{info, warn};

struct BuiltinAccount {
    username: &'static str,
    password: &'static str,
    role: Role,
    name: &'static str,
}

const BUILTIN_ACCOUNTS: &[BuiltinAccount] = &[
    BuiltinAccount {
        username: "secretaria",
        password: "123456",
        role: Role::Secretary,
        name: "Secretaria",
    },
    BuiltinAccount {
        username: "jefe",
        password: "123456",
        role: Role::Management,
        name: "Jefatura",
    },
];

/// Caller identity handed to workflow calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
    pub name: String,
}

impl Session {
    pub fn new(role: Role, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
        }
    }
}

/// Resolves credentials to a session.
///
/// Built-in accounts win over stored users with the same username. Blank
/// input never authenticates.
pub fn authenticate<S: KeyValueStore + ?Sized>(
    directory: &UserDirectory<'_, S>,
    username: &str,
    password: &str,
) -> RepoResult<Option<Session>> {
    if username.is_empty() || password.is_empty() {
        warn!("event=login module=auth status=rejected reason=missing_credentials");
        return Ok(None);
    }

    let session = match BUILTIN_ACCOUNTS
        .iter()
        .find(|account| account.username == username)
    {
        Some(account) => (account.password == password)
            .then(|| Session::new(account.role, account.name)),
        None => directory
            .find_by_username(username)?
            .filter(|user| user.password == password)
            .map(|user| Session::new(user.role.into(), user.name)),
    };

    match &session {
        Some(session) => info!("event=login module=auth status=ok role={}", session.role),
        None => warn!("event=login module=auth status=rejected reason=bad_credentials"),
    }
    Ok(session)
}
