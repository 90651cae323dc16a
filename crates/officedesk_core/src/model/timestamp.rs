//! Timestamp helpers shared by the message and notification logs.
//!
//! Stored timestamps are free-form strings. Well-formed RFC 3339 values are
//! ordered by instant; anything else sorts after them by raw text, so a
//! collection with legacy or hand-written values still has a total order.

use chrono::{DateTime, SecondsFormat, Utc};

/// Total ordering key derived from a stored timestamp string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimestampKey<'a> {
    Instant(i64),
    Raw(&'a str),
}

impl<'a> TimestampKey<'a> {
    pub fn parse(raw: &'a str) -> Self {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(instant) => Self::Instant(instant.timestamp_millis()),
            Err(_) => Self::Raw(raw),
        }
    }
}

/// Current UTC time in the stored format (`2024-01-10T09:00:00.000Z`).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
