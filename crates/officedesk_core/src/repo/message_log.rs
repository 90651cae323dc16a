//! Append-only chat log.

use super::RepoResult;
use crate::model::message::Message;
use crate::model::timestamp::TimestampKey;
use crate::store::{read_collection, write_collection, Collection, KeyValueStore};
use log::debug;

pub struct MessageLog<'store, S: KeyValueStore + ?Sized> {
    store: &'store S,
}

impl<'store, S: KeyValueStore + ?Sized> MessageLog<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }

    /// Messages exchanged between `a` and `b` in either direction, oldest first.
    ///
    /// Symmetric in its arguments. Messages with equal timestamps keep their
    /// log order.
    pub fn conversation(&self, a: &str, b: &str) -> RepoResult<Vec<Message>> {
        let mut messages: Vec<Message> = read_collection(self.store, Collection::Messages)?;
        messages.retain(|message| message.is_between(a, b));
        messages.sort_by(|left, right| {
            TimestampKey::parse(&left.timestamp).cmp(&TimestampKey::parse(&right.timestamp))
        });
        Ok(messages)
    }

    /// Appends to the end of the log. No ordering is enforced at write time.
    pub fn append(&self, message: Message) -> RepoResult<Message> {
        let mut messages: Vec<Message> = read_collection(self.store, Collection::Messages)?;
        messages.push(message.clone());
        write_collection(self.store, Collection::Messages, &messages)?;
        debug!(
            "event=message_append module=repo status=ok message_id={} log_len={}",
            message.id,
            messages.len()
        );
        Ok(message)
    }
}
