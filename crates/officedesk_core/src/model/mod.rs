//! Office domain records.
//!
//! # Responsibility
//! - Define the explicit record shapes stored in each collection.
//! - Keep the role/status transition policy in one place.
//!
//! # Invariants
//! - Records serialize with camelCase field names and lowercase enum values.
//! - Fields added after the first release are `#[serde(default)]` so older
//!   stored records still load.

pub mod appointment;
pub mod message;
pub mod notification;
pub mod role;
pub mod timestamp;
pub mod user;
