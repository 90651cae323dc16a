//! Per-recipient notices raised by appointment events.

use super::timestamp::now_timestamp;
use serde::{Deserialize, Serialize};

pub type NotificationId = String;

/// Stored notice. Only `read` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: String,
    pub title: String,
    pub message: String,
    /// Soft reference to the appointment that raised this notice; unchecked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    #[serde(default)]
    pub read: bool,
    pub timestamp: String,
}

/// Input for `NotificationCenter::create`.
///
/// A missing `id` is filled with a fresh UUID when stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub id: Option<NotificationId>,
    pub recipient: String,
    pub title: String,
    pub message: String,
    pub appointment_id: Option<String>,
    pub timestamp: String,
}

impl NewNotification {
    /// Unread notice stamped with the current time.
    pub fn new(
        recipient: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            recipient: recipient.into(),
            title: title.into(),
            message: message.into(),
            appointment_id: None,
            timestamp: now_timestamp(),
        }
    }

    pub fn for_appointment(mut self, appointment_id: impl Into<String>) -> Self {
        self.appointment_id = Some(appointment_id.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub(crate) fn into_notification(self, id: NotificationId) -> Notification {
        Notification {
            id,
            recipient: self.recipient,
            title: self.title,
            message: self.message,
            appointment_id: self.appointment_id,
            read: false,
            timestamp: self.timestamp,
        }
    }
}
