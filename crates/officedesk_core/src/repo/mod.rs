//! Collection accessors for each office record type.
//!
//! # Responsibility
//! - Expose use-case oriented CRUD over one collection each.
//! - Keep serialization and medium details behind `store`.
//!
//! # Invariants
//! - Every mutation is a full read-modify-write of one collection.
//! - Only `UserDirectory` reports semantic errors (`DuplicateUsername`,
//!   `NotFound`); missing targets elsewhere are silent no-ops.

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod appointment_book;
pub mod message_log;
pub mod notification_center;
pub mod user_directory;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    /// Another account already uses this username.
    DuplicateUsername(String),
    /// Update target id does not exist.
    NotFound(String),
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateUsername(username) => write!(f, "username already exists: {username}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::DuplicateUsername(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
