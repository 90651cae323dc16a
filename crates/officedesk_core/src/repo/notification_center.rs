//! Per-recipient notices with a read flag.

use super::RepoResult;
use crate::model::notification::{NewNotification, Notification};
use crate::model::timestamp::TimestampKey;
use crate::store::{read_collection, write_collection, Collection, KeyValueStore};
use log::{debug, info};
use uuid::Uuid;

pub struct NotificationCenter<'store, S: KeyValueStore + ?Sized> {
    store: &'store S,
}

impl<'store, S: KeyValueStore + ?Sized> NotificationCenter<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }

    /// Notices addressed to `recipient`, newest first.
    pub fn list_for(&self, recipient: &str) -> RepoResult<Vec<Notification>> {
        let mut notifications = self.load()?;
        notifications.retain(|notification| notification.recipient == recipient);
        notifications.sort_by(|left, right| {
            TimestampKey::parse(&right.timestamp).cmp(&TimestampKey::parse(&left.timestamp))
        });
        Ok(notifications)
    }

    /// Number of unread notices for `recipient`.
    pub fn unread_count(&self, recipient: &str) -> RepoResult<usize> {
        Ok(self
            .load()?
            .iter()
            .filter(|notification| notification.recipient == recipient && !notification.read)
            .count())
    }

    /// Stores a new unread notice and returns it with its assigned id.
    pub fn create(&self, notification: NewNotification) -> RepoResult<Notification> {
        let id = notification
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let stored = notification.into_notification(id);

        let mut notifications = self.load()?;
        notifications.push(stored.clone());
        write_collection(self.store, Collection::Notifications, &notifications)?;
        info!(
            "event=notification_create module=repo status=ok notification_id={} recipient={}",
            stored.id, stored.recipient
        );
        Ok(stored)
    }

    /// Flags the notice as read. Unknown ids are ignored.
    pub fn mark_read(&self, id: &str) -> RepoResult<()> {
        let mut notifications = self.load()?;
        let Some(target) = notifications
            .iter_mut()
            .find(|notification| notification.id == id)
        else {
            debug!("event=notification_mark_read module=repo status=skipped notification_id={id}");
            return Ok(());
        };
        target.read = true;
        write_collection(self.store, Collection::Notifications, &notifications)?;
        debug!("event=notification_mark_read module=repo status=ok notification_id={id}");
        Ok(())
    }

    fn load(&self) -> RepoResult<Vec<Notification>> {
        Ok(read_collection(self.store, Collection::Notifications)?)
    }
}
