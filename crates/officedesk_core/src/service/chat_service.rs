//! Direct messaging between office roles.

use crate::model::message::Message;
use crate::model::timestamp::now_timestamp;
use crate::repo::message_log::MessageLog;
use crate::repo::RepoResult;
use crate::store::KeyValueStore;
use log::debug;
use uuid::Uuid;

pub struct ChatService<'store, S: KeyValueStore + ?Sized> {
    log: MessageLog<'store, S>,
}

impl<'store, S: KeyValueStore + ?Sized> ChatService<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self {
            log: MessageLog::new(store),
        }
    }

    /// Sends `content` from `sender` to `recipient`.
    ///
    /// Returns `None` without writing when `content` is blank.
    pub fn send(
        &self,
        sender: &str,
        recipient: &str,
        content: impl Into<String>,
    ) -> RepoResult<Option<Message>> {
        let content = content.into();
        if content.trim().is_empty() {
            debug!("event=message_send module=chat status=skipped reason=blank_content");
            return Ok(None);
        }

        let message = Message {
            id: Uuid::new_v4().to_string(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            content,
            timestamp: now_timestamp(),
        };
        self.log.append(message).map(Some)
    }

    /// Conversation between the two parties, oldest first.
    pub fn conversation(&self, a: &str, b: &str) -> RepoResult<Vec<Message>> {
        self.log.conversation(a, b)
    }
}
