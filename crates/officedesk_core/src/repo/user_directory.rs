//! User accounts keyed by id with unique usernames.

use super::{RepoError, RepoResult};
use crate::model::user::User;
use crate::store::{read_collection, write_collection, Collection, KeyValueStore};
use log::{info, warn};

/// Admin-facing account directory over the `users` collection.
pub struct UserDirectory<'store, S: KeyValueStore + ?Sized> {
    store: &'store S,
}

impl<'store, S: KeyValueStore + ?Sized> UserDirectory<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }

    pub fn list(&self) -> RepoResult<Vec<User>> {
        Ok(read_collection(self.store, Collection::Users)?)
    }

    pub fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.list()?.into_iter().find(|user| user.id == id))
    }

    pub fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self.list()?.into_iter().find(|user| user.username == username))
    }

    /// Appends a new account.
    ///
    /// # Errors
    /// - `DuplicateUsername` when any stored account has the same username.
    pub fn create(&self, user: User) -> RepoResult<User> {
        let mut users = self.list()?;
        if users.iter().any(|existing| existing.username == user.username) {
            warn!("event=user_create module=repo status=rejected reason=duplicate_username");
            return Err(RepoError::DuplicateUsername(user.username));
        }

        users.push(user.clone());
        write_collection(self.store, Collection::Users, &users)?;
        info!(
            "event=user_create module=repo status=ok user_id={} role={}",
            user.id, user.role
        );
        Ok(user)
    }

    /// Replaces the account with the same id.
    ///
    /// # Errors
    /// - `NotFound` when no account has `user.id`.
    /// - `DuplicateUsername` when a different account already has the username.
    pub fn update(&self, user: User) -> RepoResult<User> {
        let mut users = self.list()?;
        let Some(index) = users.iter().position(|existing| existing.id == user.id) else {
            return Err(RepoError::NotFound(user.id));
        };
        if users
            .iter()
            .any(|existing| existing.username == user.username && existing.id != user.id)
        {
            warn!(
                "event=user_update module=repo status=rejected reason=duplicate_username user_id={}",
                user.id
            );
            return Err(RepoError::DuplicateUsername(user.username));
        }

        users[index] = user.clone();
        write_collection(self.store, Collection::Users, &users)?;
        info!("event=user_update module=repo status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Removes the account if present.
    pub fn delete(&self, id: &str) -> RepoResult<()> {
        let mut users = self.list()?;
        let before = users.len();
        users.retain(|user| user.id != id);
        write_collection(self.store, Collection::Users, &users)?;
        info!(
            "event=user_delete module=repo status=ok user_id={id} removed={}",
            before - users.len()
        );
        Ok(())
    }
}
