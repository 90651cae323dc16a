//! Key-value medium and typed collection access.
//!
//! # Responsibility
//! - Define the raw `get`/`set` contract every backing medium implements.
//! - Provide JSON (de)serialization of whole collections on top of it.
//! - Seed the four office collections on first use.
//!
//! # Invariants
//! - A missing key, or one holding only whitespace, reads as an empty
//!   collection.
//! - `write_collection` replaces the entire collection in one `set`.
//! - `initialize` never overwrites a collection that already exists.

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_store;
mod sqlite_store;

pub use memory_store::MemoryKeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;

use crate::db::DbError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Named, independently persisted collection of one record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Appointments,
    Messages,
    Notifications,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Appointments,
        Collection::Messages,
        Collection::Notifications,
        Collection::Users,
    ];

    /// Storage key used by the backing medium.
    pub fn key(self) -> &'static str {
        match self {
            Self::Appointments => "appointments",
            Self::Messages => "messages",
            Self::Notifications => "notifications",
            Self::Users => "users",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// The backing medium failed to read or write.
    Db(DbError),
    /// A stored collection is not valid JSON of the expected shape.
    Corrupt {
        collection: Collection,
        source: serde_json::Error,
    },
    /// A collection could not be encoded for storage.
    Encode {
        collection: Collection,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Corrupt { collection, source } => {
                write!(f, "stored collection `{collection}` cannot be parsed: {source}")
            }
            Self::Encode { collection, source } => {
                write!(f, "collection `{collection}` cannot be encoded: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Corrupt { source, .. } | Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw string medium behind every collection.
///
/// Implementations are single-client: callers never hold a value across a
/// `set` from another handle, and the last `set` on a key wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Ensures every office collection exists, seeding missing ones with `[]`.
///
/// Safe to call on every start-up; existing data is left untouched.
pub fn initialize<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<()> {
    let mut seeded = 0_usize;
    for collection in Collection::ALL {
        if stored_payload(store, collection)?.is_none() {
            store.set(collection.key(), "[]")?;
            seeded += 1;
        }
    }
    info!("event=store_init module=store status=ok seeded={seeded}");
    Ok(())
}

/// Reads and decodes a whole collection.
///
/// # Errors
/// - `StoreError::Corrupt` when the stored text is not a JSON array of `T`.
pub fn read_collection<T, S>(store: &S, collection: Collection) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = stored_payload(store, collection)? else {
        return Ok(Vec::new());
    };
    let records: Vec<T> = serde_json::from_str(&raw)
        .map_err(|source| StoreError::Corrupt { collection, source })?;
    debug!(
        "event=collection_read module=store collection={collection} count={}",
        records.len()
    );
    Ok(records)
}

/// Raw value of `collection`, with blank values treated as absent.
fn stored_payload<S: KeyValueStore + ?Sized>(
    store: &S,
    collection: Collection,
) -> StoreResult<Option<String>> {
    Ok(store
        .get(collection.key())?
        .filter(|raw| !raw.trim().is_empty()))
}

/// Encodes and stores a whole collection, replacing what was there.
pub fn write_collection<T, S>(store: &S, collection: Collection, records: &[T]) -> StoreResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(records)
        .map_err(|source| StoreError::Encode { collection, source })?;
    store.set(collection.key(), &raw)?;
    debug!(
        "event=collection_write module=store collection={collection} count={}",
        records.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{initialize, read_collection, Collection, KeyValueStore, MemoryKeyValueStore};

    #[test]
    fn collection_keys_match_persisted_names() {
        let keys: Vec<_> = Collection::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys, ["appointments", "messages", "notifications", "users"]);
    }

    #[test]
    fn initialize_keeps_existing_payloads() {
        let store = MemoryKeyValueStore::new();
        store.set("users", r#"[{"id":"u1"}]"#).unwrap();

        initialize(&store).unwrap();
        initialize(&store).unwrap();

        assert_eq!(store.get("users").unwrap().as_deref(), Some(r#"[{"id":"u1"}]"#));
        assert_eq!(store.get("messages").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn missing_collection_reads_empty() {
        let store = MemoryKeyValueStore::new();
        let records: Vec<serde_json::Value> =
            read_collection(&store, Collection::Notifications).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn blank_collection_reads_empty_and_is_reseeded() {
        let store = MemoryKeyValueStore::new();
        store.set("messages", "  ").unwrap();

        let records: Vec<serde_json::Value> =
            read_collection(&store, Collection::Messages).unwrap();
        assert!(records.is_empty());

        initialize(&store).unwrap();
        assert_eq!(store.get("messages").unwrap().as_deref(), Some("[]"));
    }
}
